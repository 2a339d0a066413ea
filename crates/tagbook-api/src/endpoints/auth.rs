// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Admin login and token introspection

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::common::{ApiError, ApiResult};
use crate::dtos::{CurrentUserResponse, LoginRequest, TokenResponse};
use crate::security::AuthContext;
use crate::transports::http::server::ApiState;

/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed admin token", body = TokenResponse),
        (status = 400, description = "Username or password missing", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError)
    )
)]
pub async fn login(
    State(state): State<ApiState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(request) = payload?;
    let username = request
        .username
        .or(request.email)
        .filter(|u| !u.is_empty());
    let password = request.password.filter(|p| !p.is_empty());
    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::invalid_input("Please provide username and password"));
    };

    // Argon2 verification is CPU-bound
    let auth = state.auth.clone();
    let login_name = username.clone();
    let token = tokio::task::spawn_blocking(move || auth.login(&login_name, &password))
        .await
        .map_err(|e| {
            tracing::error!(target: "tagbook-api", "Login task failed: {}", e);
            ApiError::server_error()
        })?
        .map_err(|e| {
            tracing::warn!(target: "tagbook-api", "Failed admin login for '{}'", username);
            ApiError::from(e)
        })?;

    tracing::info!(target: "tagbook-api", "Admin '{}' logged in", username);
    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Authenticated admin", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    )
)]
pub async fn me(auth: AuthContext) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        id: auth.principal_id.clone(),
        username: auth.principal_id,
        role: auth.claims.role,
    })
}
