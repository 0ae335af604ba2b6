//! HTTP server layer
//!
//! # Modules
//!
//! - [`governor`]: GCRA rate governor keyed by request path
//! - [`middleware`]: axum middleware applying the governor
//! - [`routes`]: Version endpoints and router construction
//! - [`error`]: Error responses

pub mod error;
pub mod governor;
pub mod middleware;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::scan::{HttpPageSource, Scanner};
use crate::server::governor::{Quota, RateGovernor};
use crate::server::routes::{AppState, router};

/// Build the application router from configuration.
pub fn build_app(config: &ServerConfig) -> anyhow::Result<axum::Router> {
    let source = HttpPageSource::new(config.fetch_timeout)
        .context("failed to create HTTP client")?;
    let scanner = Scanner::new(Arc::new(source), config.urls.clone())
        .context("failed to create listing scanner")?;

    let quota = Quota::per_minute(config.rate_per_minute, config.rate_burst);
    let governor = Arc::new(RateGovernor::new(quota));

    Ok(router(AppState::new(Arc::new(scanner)), governor))
}

/// Bind the configured port and serve until interrupted.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let app = build_app(&config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        %addr,
        stable = %config.urls.stable,
        prerelease = %config.urls.prerelease,
        rate_per_minute = config.rate_per_minute,
        rate_burst = config.rate_burst,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
