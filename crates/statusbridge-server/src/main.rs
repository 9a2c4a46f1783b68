mod config;
mod http;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use statusbridge_adapters::alertmanager::AlertmanagerParser;
use statusbridge_adapters::cachet::CachetClient;
use statusbridge_adapters::observability::TracingEventPublisher;
use statusbridge_app::dispatcher::AlertDispatcher;
use statusbridge_app::store::IncidentStore;
use statusbridge_app::tracker::IncidentTracker;

use crate::config::Config;
use crate::http::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(&config.log_level)?;

    info!("statusbridge v{} started", env!("CARGO_PKG_VERSION"));

    let status_page = CachetClient::new(config.cachet()).context("creating Cachet client")?;
    let tracker = IncidentTracker::new(status_page, TracingEventPublisher, IncidentStore::new());
    let state = AppState::new(
        Arc::new(AlertDispatcher::new(tracker)),
        Arc::new(AlertmanagerParser),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
