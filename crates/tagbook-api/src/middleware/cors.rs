// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// CORS middleware for HTTP API

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS: any origin, method and header, no credentials
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false)
}
