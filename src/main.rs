//! pulse: a single-host metrics dashboard served over HTTP.
//!
//! Run with:  `RUST_LOG=info pulse [path/to/pulse.toml]`

use anyhow::Result;
use pulse_dashboard::AppState;
use pulse_system::{SnapshotBuilder, SysinfoSampler};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("pulse v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(pulse_config::default_path);
    let config = pulse_config::load(&config_path)?;

    let builder = Arc::new(SnapshotBuilder::new(Arc::new(SysinfoSampler::new())));

    let listener = TcpListener::bind(config.server.bind_addr()).await?;
    tracing::info!("Dashboard listening on http://{}", listener.local_addr()?);

    pulse_dashboard::serve(listener, AppState::new(builder), shutdown_signal()).await?;

    tracing::info!("pulse stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
