// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! # Tagbook Configuration System
//!
//! Type-safe configuration loader for Tagbook with support for:
//! - TOML file parsing
//! - Environment variable overrides (including the classic `PORT`,
//!   `MONGODB_URI`, `JWT_SECRET` and `GROQ_API_KEY` names)
//! - CLI argument overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tagbook_config::{load_config, TagbookConfig};
//!
//! let config: TagbookConfig = load_config(None, None).expect("Failed to load config");
//!
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_listens_on_classic_port() {
        let config = TagbookConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.backend, StorageBackendKind::Mongo);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err: ConfigError = toml::from_str::<TagbookConfig>("[server\nport = 1")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
