//! idea-checker - idea uniqueness HTTP service
//!
//! Resolves configuration, opens the idea database, wires the search and
//! language model clients into the pipeline, and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use idea_checker::clients::{BraveSearchClient, GeminiClient};
use idea_checker::pipeline::IdeaChecker;
use idea_checker::{build_router, AppState};
use idea_common::config::{CliOverrides, ServiceConfig};
use idea_common::db::{ensure_default_admin, init_database, SqliteIdeaStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "idea-checker")]
#[command(about = "Idea uniqueness checking service", long_about = None)]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the HTTP listener to
    #[arg(long)]
    bind: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let cli = CliOverrides {
        config_path: args.config,
        bind_address: args.bind,
        port: args.port,
        database_path: args.database,
    };

    // RUST_LOG wins; otherwise INFO until the config's log level is known
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let (filter, filter_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting idea-checker v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = ServiceConfig::resolve(&cli).context("Failed to load configuration")?;
    if !rust_log_set {
        filter_handle
            .modify(|filter| *filter = EnvFilter::new(&config.log_level))
            .context("Failed to apply log level")?;
    }

    config.warn_missing_keys();

    info!("Database path: {}", config.database_path.display());
    let pool = match init_database(&config.database_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    ensure_default_admin(&pool, &config.admin_password).await?;

    let search = BraveSearchClient::new(
        config.brave_api_key.clone(),
        config.pipeline.search_requests_per_second,
    )
    .context("Failed to build search client")?;
    let generator = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .context("Failed to build language model client")?;
    info!("Language model: {}", config.gemini_model);

    let ideas = Arc::new(SqliteIdeaStore::new(pool.clone()));
    let checker = Arc::new(IdeaChecker::new(
        Arc::new(search),
        Arc::new(generator),
        ideas.clone(),
        &config.pipeline,
    ));

    let state = AppState::new(pool, checker, ideas);
    let app = build_router(state);

    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("idea-checker listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
