mod config;
mod error;
mod routes;
mod state;
mod worker;

use anyhow::Context;
use dashboard_core::Dashboard;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ServerConfig::from_env();

    // Load failures are fatal: never serve a dashboard without data.
    let dashboard =
        Dashboard::load_from_paths(&cfg.covid_archive, &cfg.stocks_archive, cfg.settings())
            .with_context(|| {
                format!(
                    "failed to load data from {} and {}",
                    cfg.covid_archive.display(),
                    cfg.stocks_archive.display()
                )
            })?;
    tracing::info!(series = dashboard.series_ids().len(), "Data loaded");

    let addr: SocketAddr = cfg
        .addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", cfg.addr()))?;

    let state = AppState::new(dashboard);
    let app = routes::router(state).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully stopping…");
}
