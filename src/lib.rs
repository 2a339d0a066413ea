// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! # Tagbook
//!
//! Reference library for a music-generation product: meta tags that steer a
//! song, product feature guides, and an AI assistant that helps write prompts.
//!
//! This umbrella crate re-exports the workspace crates and wires them into a
//! running server; the `tagbook` binary is a thin CLI over [`bootstrap`].
//!
//! ## Feature Flags
//!
//! - **`mongo`** (default): MongoDB storage backend
//! - **`file-logging`**: daily-rotated log files next to console output
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: tagbook-config, tagbook-observability      │
//! │  (TOML + env + CLI config, tracing setup)               │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Services: tagbook-services                             │
//! │  (catalog CRUD, storage backends, assistant client)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Transport: tagbook-api                                 │
//! │  (axum routes, admin tokens, uploads, static site)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

pub use tagbook_api as api;
pub use tagbook_config as config;
pub use tagbook_observability as observability;
pub use tagbook_services as services;

pub mod bootstrap;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::api::{create_http_server, ApiError, ApiState};
    pub use crate::bootstrap::{build_state, open_services, Services};
    pub use crate::config::{load_config, TagbookConfig};
    pub use crate::services::{
        AssistantService, Feature, FeatureService, MetaTag, MetaTagCategory, MetaTagService,
        ServiceError, ServiceResult,
    };
}
