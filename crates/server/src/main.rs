//! blogurdu server entry point.
//!
//! Boots the HTTP API. Logs are JSON on stderr.

use anyhow::{Context, Result};
use blogurdu_client::{Pipeline, build_translator};
use blogurdu_core::{AppConfig, BlogDb};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod service;

use service::BlogService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = BlogDb::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open database at {}", config.db_path.display()))?;
    let pipeline = Pipeline::from_config(&config)?;
    let translator = build_translator(&config.translator)?;
    tracing::info!(translator = translator.name(), db = %config.db_path.display(), "services ready");

    let service = BlogService::new(db, pipeline, translator, config.recent_limit_default);
    let app = routes::router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "starting blogurdu server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
