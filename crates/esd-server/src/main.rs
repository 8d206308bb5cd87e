//! Server entry point for the ESD monitor.
//!
//! Wires the status core into the observer HTTP + `WebSocket` server:
//! sensor readings arrive over the `WebSocket`, the status store applies
//! and logs them, and every registered observer receives the updated
//! status. A periodic liveness sweep evicts observers that stop
//! answering pings.
//!
//! # Architecture
//!
//! ```text
//! sensor bridge --ws--> ingest --> StatusStore --> broadcast --> observers
//!                                      ^
//!                          REST (read-only queries)
//! ```

mod config;

use std::sync::Arc;

use esd_observer::server::ServerConfig;
use esd_observer::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::MonitorConfig;

/// Application entry point.
///
/// Initializes logging, loads configuration from environment variables,
/// builds the shared state, spawns the liveness sweep, and serves until
/// SIGINT/SIGTERM.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server fails to
/// bind -- the only process-fatal conditions in the system.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("esd-server starting");

    let config = MonitorConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        sweep_period_secs = config.sweep_period.as_secs(),
        "configuration loaded"
    );

    let state = Arc::new(AppState::new());

    // The sweep runs for the life of the process; the handle is dropped
    // because the task ends with the runtime.
    let _sweep = esd_observer::spawn_sweep(Arc::clone(&state.registry), config.sweep_period);

    let server_config = ServerConfig {
        host: config.host,
        port: config.port,
    };
    esd_observer::start_server(&server_config, state).await?;

    Ok(())
}
