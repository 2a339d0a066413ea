// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output is always on. With the `file-logging` feature and a
//! configured `logging.file_dir`, a daily-rotated JSON file is written as well.

use anyhow::{anyhow, Result};
use tagbook_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Keeps background log writers alive; drop it last.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured level plus debug flags.
pub fn build_env_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directives = debug_flags.to_filter_string(&config.level.to_lowercase());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed or the log directory
/// cannot be created.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let env_filter = build_env_filter(config, debug_flags);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();

    #[cfg(feature = "file-logging")]
    if let Some(dir) = &config.file_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow!("Failed to create log directory {}: {}", dir.display(), e))?;
        let appender = tracing_appender::rolling::daily(dir, "tagbook.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        file_guards.push(guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .boxed(),
        );
    }

    #[cfg(not(feature = "file-logging"))]
    if config.file_dir.is_some() {
        eprintln!("logging.file_dir is set but tagbook was built without the `file-logging` feature");
    }

    Registry::default()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
    })
}
