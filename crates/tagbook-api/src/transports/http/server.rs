// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// HTTP server implementation (Axum)
//
// Routing, middleware and shared state for the REST API, plus static
// serving of uploaded images and the front-end bundle.

use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::{any, get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tagbook_services::{AssistantService, FeatureService, MetaTagService, Storage};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::common::ApiError;
use crate::middleware::create_cors_layer;
use crate::openapi::ApiDoc;
use crate::security::AdminAuth;

/// Where uploaded images live and how large they may be
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub meta_tag_service: Arc<dyn MetaTagService + Send + Sync>,
    pub feature_service: Arc<dyn FeatureService + Send + Sync>,
    pub assistant_service: Arc<dyn AssistantService + Send + Sync>,
    /// Used by the health endpoint
    pub storage: Storage,
    pub auth: Arc<AdminAuth>,
    pub uploads: Arc<UploadSettings>,
    /// Pre-built front-end bundle, served for every non-API path
    pub static_dir: Option<PathBuf>,
    pub started_at: Instant,
}

/// Multipart framing allowance on top of the image size limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the main HTTP server application
pub fn create_http_server(state: ApiState) -> Router {
    let uploads_dir = state.uploads.dir.clone();
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api", create_api_router(&state))
        .nest_service("/uploads", ServeDir::new(uploads_dir));

    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.fallback(not_found),
    };

    router
        .with_state(state)
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        target: "tagbook-api",
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        tracing::info!(
                            target: "tagbook-api",
                            status = response.status().as_u16(),
                            latency_ms = latency.as_millis() as u64,
                            "response"
                        );
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(target: "tagbook-api", "Request failed: {} after {:?}", error, latency);
                    },
                ),
        )
}

/// Routes under `/api`
fn create_api_router(state: &ApiState) -> Router<ApiState> {
    use crate::endpoints::{assistant, auth, features, health, meta_tags, uploads};

    Router::new()
        // ===== META TAGS =====
        .route(
            "/meta-tags",
            get(meta_tags::list_meta_tags).post(meta_tags::create_meta_tag),
        )
        .route(
            "/meta-tags/:id",
            get(meta_tags::get_meta_tag)
                .put(meta_tags::update_meta_tag)
                .delete(meta_tags::delete_meta_tag),
        )
        // ===== FEATURES =====
        .route(
            "/features",
            get(features::list_features).post(features::create_feature),
        )
        .route(
            "/features/:id",
            get(features::get_feature)
                .put(features::update_feature)
                .delete(features::delete_feature),
        )
        // ===== AUTH =====
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // ===== ASSISTANT =====
        .route("/assistant/chat", post(assistant::chat))
        .route("/assistant/analyze-prompt", post(assistant::analyze_prompt))
        .route("/assistant/generate-prompt", post(assistant::generate_prompt))
        // ===== UPLOADS =====
        .route(
            "/uploads",
            post(uploads::upload_image).layer(DefaultBodyLimit::max(
                state.uploads.max_bytes + MULTIPART_OVERHEAD,
            )),
        )
        // ===== HEALTH =====
        .route("/health", get(health::health))
        .route("/*rest", any(not_found))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
