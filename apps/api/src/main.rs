mod catalog;
mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryExportJobStore, InMemoryPortfolioStore, PortfolioStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Load portfolios
    let portfolios = match config.load_portfolio_json()? {
        Some(raw) => InMemoryPortfolioStore::from_json(&raw)
            .context("Failed to parse portfolio data")?,
        None => InMemoryPortfolioStore::default(),
    };
    let portfolios: Arc<dyn PortfolioStore> = Arc::new(portfolios);
    let loaded = portfolios.list().await?.len();
    if loaded == 0 {
        warn!("No portfolios loaded; set PORTFOLIO_DATA or PORTFOLIO_DATA_PATH");
    } else {
        info!("Loaded {loaded} portfolios");
    }

    // Build app state (starts the export worker)
    let state = AppState::new(
        &config.export,
        portfolios,
        Arc::new(InMemoryExportJobStore::new()),
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the builder UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
