// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::{AdminClaims, AuthError};
use crate::common::ApiError;
use crate::transports::http::server::ApiState;

/// Header the admin front end sends its token in
pub const TOKEN_HEADER: &str = "x-auth-token";

/// How the caller presented its token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `x-auth-token: <jwt>`
    TokenHeader,
    /// `Authorization: Bearer <jwt>`
    Bearer,
}

/// Authenticated caller, extracted from a verified token.
///
/// Using this as a handler argument makes the route require a token;
/// requests without one are rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Principal ID (token subject)
    pub principal_id: String,

    pub auth_method: AuthMethod,

    pub roles: Vec<String>,

    pub claims: AdminClaims,
}

impl AuthContext {
    pub fn from_claims(claims: AdminClaims, auth_method: AuthMethod) -> Self {
        Self {
            principal_id: claims.sub.clone(),
            auth_method,
            roles: vec![claims.role.clone()],
            claims,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Pull the raw token out of the request headers
pub fn extract_token(parts: &Parts) -> Option<(String, AuthMethod)> {
    if let Some(value) = parts.headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        let token = value.trim();
        if !token.is_empty() {
            return Some((token.to_string(), AuthMethod::TokenHeader));
        }
    }
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| (t.to_string(), AuthMethod::Bearer))
}

#[async_trait]
impl FromRequestParts<ApiState> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ApiState) -> Result<Self, Self::Rejection> {
        let (token, method) = extract_token(parts).ok_or(AuthError::MissingToken)?;
        let claims = state.auth.tokens.verify(&token).map_err(|e| {
            tracing::debug!(target: "tagbook-api", "Rejected token: {:?}", e);
            e
        })?;
        Ok(AuthContext::from_claims(claims, method))
    }
}
