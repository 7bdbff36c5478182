//! Leadflow server - entry point
//!
//! Thin orchestration service: ingests name batches over HTTP, enriches
//! them against the nationality-prediction API, persists the results,
//! and forwards verified leads to the CRM sink on a fixed schedule.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use leadflow_common::config::{ConfigFile, ServerConfig};
use leadflow_common::db::init_database;
use leadflow_server::services::crm::CrmSink;
use leadflow_server::services::nationalize::NationalizeClient;
use leadflow_server::services::sync::{spawn_sync_task, SYNC_INTERVAL};
use leadflow_server::{build_router, AppState};

/// Command-line arguments for leadflow-server
#[derive(Parser, Debug)]
#[command(name = "leadflow-server")]
#[command(about = "Lead enrichment and CRM sync service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "LEADFLOW_PORT")]
    port: Option<u16>,

    /// Exact origin allowed for cross-origin requests
    #[arg(long, env = "LEADFLOW_CORS_ORIGIN")]
    cors_origin: Option<String>,

    /// Path to the SQLite database
    #[arg(short, long, env = "LEADFLOW_DATABASE")]
    database: Option<PathBuf>,

    /// Base URL of the nationality-prediction API
    #[arg(long, env = "LEADFLOW_NATIONALIZE_URL")]
    nationalize_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting leadflow-server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let file = ConfigFile::load().context("Failed to load config file")?;
    let config = ServerConfig::resolve(
        args.port,
        args.cors_origin,
        args.database,
        args.nationalize_url,
        file,
    );

    info!("Database: {}", config.database_path.display());
    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let nationalize = Arc::new(
        NationalizeClient::with_base_url(config.nationalize_url.clone())
            .context("Failed to build nationalize client")?,
    );

    let state = AppState::new(pool.clone(), nationalize);

    spawn_sync_task(pool, CrmSink::new());
    info!(
        "CRM sync scheduled every {} seconds",
        SYNC_INTERVAL.as_secs()
    );

    let cors = match &config.cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .with_context(|| format!("Invalid CORS origin: {origin}"))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    };

    let app = build_router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("leadflow-server listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
