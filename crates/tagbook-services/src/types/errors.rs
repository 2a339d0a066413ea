// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors that adapters map to HTTP status codes.
*/

use thiserror::Error;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    /// Resource not found (404 in HTTP)
    #[error("{resource} not found")]
    NotFound { resource: String, id: String },

    /// Invalid input parameters (400 in HTTP)
    #[error("{0}")]
    InvalidInput(String),

    /// Unique key already taken (400 in HTTP)
    #[error("{resource} already exists")]
    AlreadyExists { resource: String, key: String },

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Storage backend cannot be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Hosted model API failure
    #[error("{0}")]
    Upstream(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn already_exists(resource: impl Into<String>, key: impl Into<String>) -> Self {
        ServiceError::AlreadyExists {
            resource: resource.into(),
            key: key.into(),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{} is invalid", field),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        messages.sort();
        ServiceError::InvalidInput(messages.join(", "))
    }
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for ServiceError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::ConnectionPoolCleared { .. } => {
                ServiceError::Unavailable(err.to_string())
            }
            _ => ServiceError::Storage(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}
