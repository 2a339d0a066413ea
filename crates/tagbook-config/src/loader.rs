// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults; built-in defaults when no file exists)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, StorageBackendKind, TagbookConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for on disk
pub const CONFIG_FILE_NAME: &str = "tagbook.toml";

/// Find the Tagbook configuration file
///
/// Search order:
/// 1. `TAGBOOK_CONFIG_PATH` environment variable
/// 2. Current working directory: `./tagbook.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("TAGBOOK_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by TAGBOOK_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration
///
/// * `config_path` - explicit config file. If `None`, the file is searched for and
///   built-in defaults are used when nothing is found.
/// * `cli_args` - optional CLI overrides, applied last
///
/// # Errors
///
/// Returns an error if an explicit file cannot be read, `TAGBOOK_CONFIG_PATH` points
/// at a missing file, the TOML is invalid, or an override value does not parse.
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<TagbookConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            Err(ConfigError::FileNotFound(_)) if env::var("TAGBOOK_CONFIG_PATH").is_err() => None,
            Err(e) => return Err(e),
        },
    };

    let mut config = match config_file {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            toml::from_str(&content)?
        }
        None => TagbookConfig::default(),
    };

    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `TAGBOOK_HOST` -> `server.host`
/// - `PORT` / `TAGBOOK_PORT` -> `server.port` (`TAGBOOK_PORT` wins)
/// - `TAGBOOK_STORAGE` -> `storage.backend`
/// - `MONGODB_URI` -> `storage.mongodb_uri`
/// - `TAGBOOK_DATABASE` -> `storage.database`
/// - `JWT_SECRET` -> `auth.jwt_secret`
/// - `ADMIN_USERNAME` -> `auth.admin_username`
/// - `ADMIN_PASSWORD_HASH` -> `auth.admin_password_hash`
/// - `GROQ_API_KEY` -> `assistant.api_key`
/// - `TAGBOOK_ASSISTANT_URL` -> `assistant.api_base_url`
/// - `TAGBOOK_ASSISTANT_MODEL` -> `assistant.model`
/// - `TAGBOOK_UPLOAD_DIR` -> `uploads.dir`
/// - `TAGBOOK_STATIC_DIR` -> `static_site.dir`
/// - `TAGBOOK_LOG_LEVEL` -> `logging.level`
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a port or storage backend that does not parse
pub fn apply_environment_overrides(config: &mut TagbookConfig) -> ConfigResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Same as [`apply_environment_overrides`], reading values from `lookup`
pub fn apply_overrides_from<F>(config: &mut TagbookConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup("TAGBOOK_HOST") {
        config.server.host = value;
    }
    for key in ["PORT", "TAGBOOK_PORT"] {
        if let Some(value) = lookup(key) {
            config.server.port = parse_port(key, &value)?;
        }
    }

    if let Some(value) = lookup("TAGBOOK_STORAGE") {
        config.storage.backend = parse_backend("TAGBOOK_STORAGE", &value)?;
    }
    if let Some(value) = lookup("MONGODB_URI") {
        config.storage.mongodb_uri = value;
    }
    if let Some(value) = lookup("TAGBOOK_DATABASE") {
        config.storage.database = value;
    }

    if let Some(value) = lookup("JWT_SECRET") {
        config.auth.jwt_secret = value;
    }
    if let Some(value) = lookup("ADMIN_USERNAME") {
        config.auth.admin_username = value;
    }
    if let Some(value) = lookup("ADMIN_PASSWORD_HASH") {
        config.auth.admin_password_hash = value;
    }

    if let Some(value) = lookup("GROQ_API_KEY") {
        config.assistant.api_key = value;
    }
    if let Some(value) = lookup("TAGBOOK_ASSISTANT_URL") {
        config.assistant.api_base_url = value;
    }
    if let Some(value) = lookup("TAGBOOK_ASSISTANT_MODEL") {
        config.assistant.model = value;
    }

    if let Some(value) = lookup("TAGBOOK_UPLOAD_DIR") {
        config.uploads.dir = PathBuf::from(value);
    }
    if let Some(value) = lookup("TAGBOOK_STATIC_DIR") {
        config.static_site.dir = Some(PathBuf::from(value));
    }
    if let Some(value) = lookup("TAGBOOK_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}

fn parse_port(source: &str, value: &str) -> ConfigResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{}: `{}` is not a valid port", source, value)))
}

fn parse_backend(source: &str, value: &str) -> ConfigResult<StorageBackendKind> {
    value
        .parse()
        .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", source, e)))
}

/// Apply CLI argument overrides to configuration
///
/// Keys: `host`, `port`, `storage`, `mongodb_uri`, `database`, `static_dir`, `log_level`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a port or storage backend that does not parse
pub fn apply_cli_overrides(
    config: &mut TagbookConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("host") {
        config.server.host = value.clone();
    }
    if let Some(value) = cli_args.get("port") {
        config.server.port = parse_port("--port", value)?;
    }
    if let Some(value) = cli_args.get("storage") {
        config.storage.backend = parse_backend("--storage", value)?;
    }
    if let Some(value) = cli_args.get("mongodb_uri") {
        config.storage.mongodb_uri = value.clone();
    }
    if let Some(value) = cli_args.get("database") {
        config.storage.database = value.clone();
    }
    if let Some(value) = cli_args.get("static_dir") {
        config.static_site.dir = Some(PathBuf::from(value));
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageBackendKind;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 8080").unwrap();
        writeln!(file, "[storage]").unwrap();
        writeln!(file, "backend = \"memory\"").unwrap();
        writeln!(file, "[assistant]").unwrap();
        writeln!(file, "model = \"llama-3.3-70b-versatile\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.storage.backend, StorageBackendKind::Memory);
        assert_eq!(config.assistant.model, "llama-3.3-70b-versatile");
        // Untouched sections keep their defaults
        assert_eq!(config.assistant.max_tokens, 4096);
        assert_eq!(config.auth.admin_username, "admin");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")), None);
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_classic_environment_names() {
        let mut config = TagbookConfig::default();
        apply_overrides_from(
            &mut config,
            lookup_from(&[
                ("PORT", "7000"),
                ("MONGODB_URI", "mongodb://db:27017"),
                ("JWT_SECRET", "s3cret-s3cret-s3cret-s3cret-s3cret"),
                ("GROQ_API_KEY", "gsk_test"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.storage.mongodb_uri, "mongodb://db:27017");
        assert_eq!(config.auth.jwt_secret, "s3cret-s3cret-s3cret-s3cret-s3cret");
        assert_eq!(config.assistant.api_key, "gsk_test");
    }

    #[test]
    fn test_prefixed_port_wins_over_classic_port() {
        let mut config = TagbookConfig::default();
        apply_overrides_from(
            &mut config,
            lookup_from(&[("PORT", "7000"), ("TAGBOOK_PORT", "7100")]),
        )
        .unwrap();
        assert_eq!(config.server.port, 7100);
    }

    #[test]
    fn test_unparseable_values_are_rejected() {
        let mut config = TagbookConfig::default();
        let result = apply_overrides_from(&mut config, lookup_from(&[("TAGBOOK_STORAGE", "redis")]));
        match result {
            Err(ConfigError::InvalidValue(msg)) => assert!(msg.contains("TAGBOOK_STORAGE")),
            other => panic!("expected InvalidValue, got {:?}", other),
        }

        let result = apply_overrides_from(&mut config, lookup_from(&[("PORT", "not-a-port")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_cli_rejects_unknown_backend() {
        let mut config = TagbookConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("storage".to_string(), "memroy".to_string());

        let result = apply_cli_overrides(&mut config, &cli_args);

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
        assert_eq!(config.storage.backend, StorageBackendKind::Mongo);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = TagbookConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("host".to_string(), "127.0.0.1".to_string());
        cli_args.insert("port".to_string(), "9000".to_string());
        cli_args.insert("storage".to_string(), "memory".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackendKind::Memory);
    }
}
