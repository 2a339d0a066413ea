// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Liveness plus a storage ping

use axum::extract::State;
use axum::Json;

use crate::dtos::{HealthResponse, StorageHealth};
use crate::transports::http::server::ApiState;

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server status", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let connected = match state.storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(target: "tagbook-api", "Storage ping failed: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        storage: StorageHealth {
            backend: state.storage.kind.to_string(),
            connected,
        },
        version: crate::VERSION.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
