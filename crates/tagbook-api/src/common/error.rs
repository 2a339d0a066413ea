// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

use crate::security::AuthError;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    AlreadyExists,
    Unauthorized,
    Forbidden,
    PayloadTooLarge,
    Internal,
    ServiceUnavailable,
}

impl ApiErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidInput | ApiErrorCode::AlreadyExists => StatusCode::BAD_REQUEST,
            ApiErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ApiErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// API error body (`{"msg": ...}`, the shape the front end reads)
#[derive(Debug, Error, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    pub msg: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,

    /// Underlying cause, when it is safe to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            code: None,
            error: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(msg).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(msg).with_code(ApiErrorCode::Unauthorized)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(msg).with_code(ApiErrorCode::Forbidden)
    }

    pub fn payload_too_large(msg: impl Into<String>) -> Self {
        Self::new(msg).with_code(ApiErrorCode::PayloadTooLarge)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(msg).with_code(ApiErrorCode::NotFound)
    }

    /// Generic 500; the detail goes to the log only
    pub fn server_error() -> Self {
        Self::new("Server Error").with_code(ApiErrorCode::Internal)
    }

    pub fn status_code(&self) -> StatusCode {
        self.code
            .map(|c| c.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Convert service layer errors to API errors
impl From<tagbook_services::ServiceError> for ApiError {
    fn from(err: tagbook_services::ServiceError) -> Self {
        use tagbook_services::ServiceError;

        match err {
            ServiceError::NotFound { .. } => ApiError::not_found(err.to_string()),
            ServiceError::InvalidInput(msg) => ApiError::invalid_input(msg),
            ServiceError::AlreadyExists { .. } => {
                ApiError::new(err.to_string()).with_code(ApiErrorCode::AlreadyExists)
            }
            ServiceError::Unavailable(msg) => {
                tracing::error!(target: "tagbook-api", "Storage unavailable: {}", msg);
                ApiError::new("Server Error").with_code(ApiErrorCode::ServiceUnavailable)
            }
            ServiceError::Upstream(msg) => {
                tracing::error!(target: "tagbook-api", "Upstream failure: {}", msg);
                ApiError::server_error().with_error(msg)
            }
            ServiceError::Storage(msg) | ServiceError::Internal(msg) => {
                tracing::error!(target: "tagbook-api", "{}", msg);
                ApiError::server_error()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Crypto(detail) => {
                tracing::error!(target: "tagbook-api", "Auth failure: {}", detail);
                ApiError::server_error()
            }
            AuthError::Forbidden => ApiError::forbidden(err.to_string()),
            other => ApiError::unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large("File too large")
        } else {
            ApiError::invalid_input(err.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagbook_services::ServiceError;

    #[test]
    fn test_service_error_mapping() {
        let err: ApiError = ServiceError::not_found("Meta tag", "abc").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.msg, "Meta tag not found");

        let err: ApiError = ServiceError::already_exists("Feature", "Custom Mode").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.msg, "Feature already exists");

        let err: ApiError = ServiceError::Storage("connection reset".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.msg, "Server Error");
        assert!(err.error.is_none());

        let err: ApiError = ServiceError::Unavailable("no servers".into()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_body_shape() {
        let err = ApiError::unauthorized("Token is not valid");
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["msg"], "Token is not valid");
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert!(body.get("error").is_none());
    }
}
