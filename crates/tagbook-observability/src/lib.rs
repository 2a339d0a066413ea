// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! # tagbook-observability
//!
//! Logging setup shared by every Tagbook binary, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: daily-rotated JSON log files next to console output

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known Tagbook crate names for debug flags (these are also the log targets)
pub const KNOWN_CRATES: &[&str] = &[
    "tagbook",
    "tagbook-api",
    "tagbook-services",
    "tagbook-config",
];
