// Copyright 2025 Tagbook Developers
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;

use tagbook::bootstrap::{build_state, open_services};
use tagbook::services::seed;
use tagbook_config::{load_config, validate_config, StorageBackendKind, TagbookConfig};
use tagbook_observability::{debug_flags_help, init_logging, parse_debug_flags, CrateDebugFlags};

/// Tagbook - meta tag and feature reference server
#[derive(Parser, Debug)]
#[command(name = "tagbook", version, author, long_about = None, after_help = debug_flags_help())]
struct Cli {
    /// Path to tagbook.toml (otherwise searched for, then defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (memory, mongo)
    #[arg(long, global = true)]
    storage: Option<StorageBackendKind>,

    /// MongoDB connection string
    #[arg(long, global = true)]
    mongodb_uri: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Raise crates to debug, comma-separated (e.g. "tagbook-api,tagbook-services" or "all")
    #[arg(long, value_delimiter = ',', global = true)]
    debug: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Load the built-in catalog, replacing what is stored
    Seed {
        /// Only delete the stored catalog
        #[arg(short = 'd', long)]
        destroy: bool,
    },

    /// Print an Argon2 hash for `auth.admin_password_hash`
    HashPassword {
        /// Password to hash (read from stdin when omitted)
        password: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the built front end
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                overrides.insert(key.to_string(), value);
            }
        };
        put("storage", self.storage.map(|b| b.to_string()));
        put("mongodb_uri", self.mongodb_uri.clone());
        put("log_level", self.log_level.clone());
        if let Command::Serve(serve) = &self.command {
            put("host", serve.host.clone());
            put("port", serve.port.map(|p| p.to_string()));
            put(
                "static_dir",
                serve.static_dir.as_ref().map(|d| d.display().to_string()),
            );
        }
        overrides
    }

    fn debug_flags(&self) -> CrateDebugFlags {
        parse_debug_flags(self.debug.iter().map(|name| match name.trim() {
            "all" => "--debug-all".to_string(),
            name => format!("--debug-{}", name),
        }))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::HashPassword { password } = &cli.command {
        return hash_password(password.clone());
    }

    let config = load_config(cli.config.as_deref(), Some(&cli.overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    let _logging_guard = init_logging(&config.logging, &cli.debug_flags())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        match cli.command {
            Command::Serve(_) => serve(config).await,
            Command::Seed { destroy } => seed_catalog(config, destroy).await,
            Command::HashPassword { .. } => Ok(()),
        }
    })
}

async fn serve(config: TagbookConfig) -> Result<()> {
    tracing::info!(target: "tagbook", "Tagbook v{}", tagbook::VERSION);

    let state = build_state(&config).await?;
    let app = tagbook_api::create_http_server(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(target: "tagbook", "Listening on http://{}", addr);

    axum_serve(listener, app).await
}

async fn axum_serve(listener: tokio::net::TcpListener, app: axum::Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    tracing::info!(target: "tagbook", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(target: "tagbook", "Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!(target: "tagbook", "Shutdown requested");
}

async fn seed_catalog(config: TagbookConfig, destroy: bool) -> Result<()> {
    let services = open_services(&config).await?;
    let meta_tags = services.meta_tags.as_ref();
    let features = services.features.as_ref();

    if destroy {
        let removed = seed::destroy_catalog(meta_tags, features)
            .await
            .context("Failed to destroy catalog")?;
        println!(
            "Data destroyed: {} meta tags, {} features",
            removed.meta_tags, removed.features
        );
    } else {
        let loaded = seed::seed_catalog(meta_tags, features)
            .await
            .context("Failed to seed catalog")?;
        println!(
            "Data imported: {} meta tags, {} features",
            loaded.meta_tags, loaded.features
        );
    }
    Ok(())
}

fn hash_password(password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .read_line(&mut line)
                .context("Failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }
    let hash = tagbook_api::security::auth::hash_password(&password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    println!("{}", hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_flag_is_parsed() {
        let cli = Cli::try_parse_from(["tagbook", "--storage", "memory", "serve", "--port", "8080"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.get("storage").map(String::as_str), Some("memory"));
        assert_eq!(overrides.get("port").map(String::as_str), Some("8080"));
    }

    #[test]
    fn test_unknown_storage_flag_is_rejected() {
        assert!(Cli::try_parse_from(["tagbook", "--storage", "memroy", "serve"]).is_err());
    }
}
