// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Image upload for feature illustrations

use axum::extract::{Multipart, State};
use axum::Json;
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::dtos::{UploadForm, UploadResponse};
use crate::security::{AuthContext, ADMIN_ROLE};
use crate::transports::http::server::ApiState;

/// Multipart field carrying the file
pub const IMAGE_FIELD: &str = "image";

/// File extension for an accepted image content type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// POST /api/uploads
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = []), ("token_header" = [])),
    responses(
        (status = 200, description = "Stored image", body = UploadResponse),
        (status = 400, description = "Missing file or unsupported type", body = ApiError),
        (status = 401, description = "Missing or invalid token", body = ApiError),
        (status = 413, description = "File too large", body = ApiError)
    )
)]
pub async fn upload_image(
    State(state): State<ApiState>,
    auth: AuthContext,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    auth.require_role(ADMIN_ROLE)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let extension = image_extension(&content_type).ok_or_else(|| {
            ApiError::invalid_input("Only JPEG, PNG, GIF and WEBP images are allowed")
        })?;

        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(ApiError::invalid_input("Uploaded file is empty"));
        }
        if data.len() > state.uploads.max_bytes {
            return Err(ApiError::payload_too_large("File too large"));
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = state.uploads.dir.join(&file_name);
        let stored: std::io::Result<()> = async {
            tokio::fs::create_dir_all(&state.uploads.dir).await?;
            tokio::fs::write(&path, &data).await
        }
        .await;
        stored.map_err(|e| {
            tracing::error!(target: "tagbook-api", "Failed to store upload {}: {}", path.display(), e);
            ApiError::server_error()
        })?;

        tracing::info!(target: "tagbook-api", "Stored upload {} ({} bytes)", file_name, data.len());
        return Ok(Json(UploadResponse {
            url: format!("/uploads/{}", file_name),
        }));
    }

    Err(ApiError::invalid_input("No image uploaded"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("image/png"), Some("png"));
        assert_eq!(image_extension("image/jpeg"), Some("jpg"));
        assert_eq!(image_extension("image/svg+xml"), None);
        assert_eq!(image_extension(""), None);
    }
}
