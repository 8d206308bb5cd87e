//! Observer API server for the ESD monitor.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) carrying the persistent
//!   sensor/observer connection: sensor readings and commands in, status
//!   broadcasts and replies out
//! - **REST endpoints** for read-only queries (status, safety, alerts,
//!   health)
//!
//! # Architecture
//!
//! Each `WebSocket` connection runs as its own task; slow or stalled
//! connections cannot block the others. Every connection registers in
//! the [`ClientRegistry`] and owns an outbound frame queue, so status
//! fan-out never waits on network I/O. A periodic liveness sweep evicts
//! clients that stop answering pings. The single [`StatusStore`] from
//! [`esd_core`] is shared by reference through [`AppState`].
//!
//! [`StatusStore`]: esd_core::StatusStore

pub mod broadcast;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use broadcast::broadcast_status;
pub use registry::{ClientHandle, ClientRegistry, DEFAULT_SWEEP_PERIOD, spawn_sweep};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
