// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Collects every problem in one pass so a misconfigured deployment reports
//! all of them at once.

use crate::{ConfigError, ConfigResult, StorageBackendKind, TagbookConfig};

/// Minimum length of an explicitly configured token secret
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidPort { port_name: String },
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort { port_name } => {
                write!(f, "Port {} must not be 0", port_name)
            }
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &TagbookConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_server(config, &mut errors);
    validate_storage(config, &mut errors);
    validate_auth(config, &mut errors);
    validate_assistant(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_server(config: &TagbookConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.server.port == 0 {
        errors.push(ConfigValidationError::InvalidPort {
            port_name: "server.port".to_string(),
        });
    }
    if config.server.host.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "server.host".to_string(),
        });
    }
}

fn validate_storage(config: &TagbookConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.storage.backend == StorageBackendKind::Mongo {
        if config.storage.mongodb_uri.is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: "storage.mongodb_uri".to_string(),
            });
        }
        if config.storage.database.is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: "storage.database".to_string(),
            });
        }
    }
}

fn validate_auth(config: &TagbookConfig, errors: &mut Vec<ConfigValidationError>) {
    // Empty secret is allowed: the server generates an ephemeral one.
    let secret_len = config.auth.jwt_secret.len();
    if secret_len > 0 && secret_len < MIN_JWT_SECRET_LENGTH {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.jwt_secret".to_string(),
            reason: format!("must be at least {} bytes", MIN_JWT_SECRET_LENGTH),
        });
    }
    if config.auth.token_lifetime_secs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.token_lifetime_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if config.auth.admin_username.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "auth.admin_username".to_string(),
        });
    }
    let hash = &config.auth.admin_password_hash;
    if !hash.is_empty() && !hash.starts_with("$argon2") {
        errors.push(ConfigValidationError::InvalidValue {
            field: "auth.admin_password_hash".to_string(),
            reason: "must be an Argon2 PHC string (see `tagbook hash-password`)".to_string(),
        });
    }
}

fn validate_assistant(config: &TagbookConfig, errors: &mut Vec<ConfigValidationError>) {
    let assistant = &config.assistant;
    if !(0.0..=2.0).contains(&assistant.temperature) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "assistant.temperature".to_string(),
            reason: "must be between 0.0 and 2.0".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&assistant.top_p) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "assistant.top_p".to_string(),
            reason: "must be between 0.0 and 1.0".to_string(),
        });
    }
    if assistant.max_tokens == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "assistant.max_tokens".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !assistant.api_base_url.starts_with("http://") && !assistant.api_base_url.starts_with("https://") {
        errors.push(ConfigValidationError::InvalidValue {
            field: "assistant.api_base_url".to_string(),
            reason: "must be an http(s) URL".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TagbookConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_short_jwt_secret() {
        let mut config = TagbookConfig::default();
        config.auth.jwt_secret = "short".to_string();

        let result = validate_config(&config);
        match result {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("auth.jwt_secret"));
                assert!(msg.contains("32"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_plaintext_password_rejected() {
        let mut config = TagbookConfig::default();
        config.auth.admin_password_hash = "hunter2".to_string();

        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("admin_password_hash")));
    }

    #[test]
    fn test_all_problems_reported_together() {
        let mut config = TagbookConfig::default();
        config.server.port = 0;
        config.assistant.top_p = 1.5;
        config.storage.mongodb_uri = String::new();

        let Err(ConfigError::ValidationError(msg)) = validate_config(&config) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("server.port"));
        assert!(msg.contains("assistant.top_p"));
        assert!(msg.contains("storage.mongodb_uri"));
    }

    #[test]
    fn test_memory_backend_ignores_mongo_settings() {
        let mut config = TagbookConfig::default();
        config.storage.backend = StorageBackendKind::Memory;
        config.storage.mongodb_uri = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
