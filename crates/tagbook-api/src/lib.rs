// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

// Tagbook REST API Layer
//
// Axum transport over the transport-agnostic services in `tagbook-services`:
// catalog CRUD, admin login, assistant relay, image uploads and OpenAPI.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod dtos;
pub mod endpoints;
pub mod middleware;
pub mod openapi;
pub mod security;
pub mod transports;

// Re-export commonly used types
pub use common::{ApiError, ApiErrorCode, ApiResult, MessageResponse};
pub use security::{AdminAuth, AuthContext, AuthError};
pub use transports::http::{create_http_server, ApiState, UploadSettings};
