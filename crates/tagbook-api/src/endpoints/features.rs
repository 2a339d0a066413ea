// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
 * Feature catalog endpoints
 *
 * Reads are public; writes need an admin token.
 */

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tagbook_services::{Feature, FeatureChanges, NewFeature};

use crate::common::{ApiError, ApiResult, MessageResponse};
use crate::security::{AuthContext, ADMIN_ROLE};
use crate::transports::http::server::ApiState;

/// GET /api/features
#[utoipa::path(
    get,
    path = "/api/features",
    tag = "Features",
    responses(
        (status = 200, description = "All features, by display order", body = Vec<Feature>),
        (status = 500, description = "Server error", body = ApiError)
    )
)]
pub async fn list_features(State(state): State<ApiState>) -> ApiResult<Json<Vec<Feature>>> {
    Ok(Json(state.feature_service.list_features().await?))
}

/// GET /api/features/:id
#[utoipa::path(
    get,
    path = "/api/features/{id}",
    tag = "Features",
    params(("id" = String, Path, description = "Feature id")),
    responses(
        (status = 200, description = "Feature", body = Feature),
        (status = 404, description = "Feature not found", body = ApiError)
    )
)]
pub async fn get_feature(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Feature>> {
    Ok(Json(state.feature_service.get_feature(&id).await?))
}

/// POST /api/features
#[utoipa::path(
    post,
    path = "/api/features",
    tag = "Features",
    request_body = NewFeature,
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Created feature", body = Feature),
        (status = 400, description = "Invalid input or title already taken", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    )
)]
pub async fn create_feature(
    State(state): State<ApiState>,
    auth: AuthContext,
    payload: Result<Json<NewFeature>, JsonRejection>,
) -> ApiResult<Json<Feature>> {
    auth.require_role(ADMIN_ROLE)?;
    let Json(new) = payload?;
    Ok(Json(state.feature_service.create_feature(new).await?))
}

/// PUT /api/features/:id
#[utoipa::path(
    put,
    path = "/api/features/{id}",
    tag = "Features",
    params(("id" = String, Path, description = "Feature id")),
    request_body = FeatureChanges,
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Updated feature", body = Feature),
        (status = 400, description = "Invalid input or title already taken", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Feature not found", body = ApiError)
    )
)]
pub async fn update_feature(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: Result<Json<FeatureChanges>, JsonRejection>,
) -> ApiResult<Json<Feature>> {
    auth.require_role(ADMIN_ROLE)?;
    let Json(changes) = payload?;
    Ok(Json(state.feature_service.update_feature(&id, changes).await?))
}

/// DELETE /api/features/:id
#[utoipa::path(
    delete,
    path = "/api/features/{id}",
    tag = "Features",
    params(("id" = String, Path, description = "Feature id")),
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Feature removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Feature not found", body = ApiError)
    )
)]
pub async fn delete_feature(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    auth.require_role(ADMIN_ROLE)?;
    state.feature_service.delete_feature(&id).await?;
    Ok(Json(MessageResponse::new("Feature removed")))
}
