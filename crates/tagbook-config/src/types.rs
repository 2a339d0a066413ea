// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `tagbook.toml`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TagbookConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub assistant: AssistantConfig,
    pub uploads: UploadsConfig,
    pub static_site: StaticSiteConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Which storage backend holds the content collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Mongo,
    Memory,
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendKind::Mongo => write!(f, "mongo"),
            StorageBackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackendKind::Mongo),
            "memory" | "mem" => Ok(StorageBackendKind::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    pub mongodb_uri: String,
    pub database: String,
    /// Seed the built-in catalog into empty collections on startup
    pub seed_if_empty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Mongo,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "tagbook".to_string(),
            seed_if_empty: false,
        }
    }
}

/// Admin authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing admin tokens. Empty means "generate one per process".
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub token_lifetime_secs: u64,
    pub admin_username: String,
    /// Argon2id PHC string (see `tagbook hash-password`)
    pub admin_password_hash: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: "tagbook".to_string(),
            token_lifetime_secs: 86_400,
            admin_username: "admin".to_string(),
            admin_password_hash: String::new(),
        }
    }
}

/// Hosted chat-completion API used by the assistant endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key: String::new(),
            model: "deepseek-r1-distill-llama-70b".to_string(),
            temperature: 0.75,
            max_tokens: 4096,
            top_p: 0.95,
            timeout_secs: 120,
        }
    }
}

/// Image upload storage
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadsConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Pre-built front-end bundle served for every non-API path
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticSiteConfig {
    pub dir: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Directory for rotated log files (requires the `file-logging` feature)
    pub file_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            file_dir: None,
        }
    }
}
