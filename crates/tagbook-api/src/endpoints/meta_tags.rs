// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

/*!
 * Meta tag catalog endpoints
 *
 * Reads are public; writes need an admin token.
 */

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use tagbook_services::{MetaTag, MetaTagChanges, NewMetaTag};

use crate::common::{ApiError, ApiResult, MessageResponse};
use crate::security::{AuthContext, ADMIN_ROLE};
use crate::transports::http::server::ApiState;

/// GET /api/meta-tags
#[utoipa::path(
    get,
    path = "/api/meta-tags",
    tag = "Meta Tags",
    responses(
        (status = 200, description = "All meta tags, by category then name", body = Vec<MetaTag>),
        (status = 500, description = "Server error", body = ApiError)
    )
)]
pub async fn list_meta_tags(State(state): State<ApiState>) -> ApiResult<Json<Vec<MetaTag>>> {
    Ok(Json(state.meta_tag_service.list_meta_tags().await?))
}

/// GET /api/meta-tags/:id
#[utoipa::path(
    get,
    path = "/api/meta-tags/{id}",
    tag = "Meta Tags",
    params(("id" = String, Path, description = "Meta tag id")),
    responses(
        (status = 200, description = "Meta tag", body = MetaTag),
        (status = 404, description = "Meta tag not found", body = ApiError)
    )
)]
pub async fn get_meta_tag(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MetaTag>> {
    Ok(Json(state.meta_tag_service.get_meta_tag(&id).await?))
}

/// POST /api/meta-tags
#[utoipa::path(
    post,
    path = "/api/meta-tags",
    tag = "Meta Tags",
    request_body = NewMetaTag,
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Created meta tag", body = MetaTag),
        (status = 400, description = "Invalid input or name already taken", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError)
    )
)]
pub async fn create_meta_tag(
    State(state): State<ApiState>,
    auth: AuthContext,
    payload: Result<Json<NewMetaTag>, JsonRejection>,
) -> ApiResult<Json<MetaTag>> {
    auth.require_role(ADMIN_ROLE)?;
    let Json(new) = payload?;
    Ok(Json(state.meta_tag_service.create_meta_tag(new).await?))
}

/// PUT /api/meta-tags/:id
#[utoipa::path(
    put,
    path = "/api/meta-tags/{id}",
    tag = "Meta Tags",
    params(("id" = String, Path, description = "Meta tag id")),
    request_body = MetaTagChanges,
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Updated meta tag", body = MetaTag),
        (status = 400, description = "Invalid input or name already taken", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Meta tag not found", body = ApiError)
    )
)]
pub async fn update_meta_tag(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(id): Path<String>,
    payload: Result<Json<MetaTagChanges>, JsonRejection>,
) -> ApiResult<Json<MetaTag>> {
    auth.require_role(ADMIN_ROLE)?;
    let Json(changes) = payload?;
    Ok(Json(state.meta_tag_service.update_meta_tag(&id, changes).await?))
}

/// DELETE /api/meta-tags/:id
#[utoipa::path(
    delete,
    path = "/api/meta-tags/{id}",
    tag = "Meta Tags",
    params(("id" = String, Path, description = "Meta tag id")),
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Meta tag removed", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 404, description = "Meta tag not found", body = ApiError)
    )
)]
pub async fn delete_meta_tag(
    State(state): State<ApiState>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    auth.require_role(ADMIN_ROLE)?;
    state.meta_tag_service.delete_meta_tag(&id).await?;
    Ok(Json(MessageResponse::new("Meta tag removed")))
}
