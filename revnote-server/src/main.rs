//! revnote-server - review comment service
//!
//! Resolves configuration, opens the SQLite database and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use revnote_common::config::{ConfigOverrides, ServiceConfig};
use revnote_server::{build_router, AppState};

/// Command-line arguments for revnote-server
#[derive(Parser, Debug)]
#[command(name = "revnote-server")]
#[command(about = "Review comment CRUD service")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// CSV file used by the bulk load endpoint
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Listen address (host:port)
    #[arg(short, long)]
    bind: Option<String>,

    /// Default log filter (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Config file (defaults to ~/.config/revnote/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            database: args.database,
            source: args.source,
            bind: args.bind,
            log_level: args.log_level,
            config_file: args.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let overrides = ConfigOverrides::from(Args::parse());
    let config = ServiceConfig::resolve(&overrides).context("Failed to resolve configuration")?;

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting revnote-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    info!("Database path: {}", config.database_path.display());
    info!("Bulk load source: {}", config.source_path.display());

    let pool = match revnote_common::db::init_database(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(pool, config.source_path.clone());
    info!("✓ {} comments stored", state.store.count().await?);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;
    info!("revnote-server listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
