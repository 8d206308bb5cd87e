//! Shared application state for the observer API server.
//!
//! [`AppState`] bundles the single [`StatusStore`] with the
//! [`ClientRegistry`] of connected observers. It is wrapped in [`Arc`]
//! and injected via Axum's `State` extractor; every component receives
//! the same store instance by reference rather than through any ambient
//! global.

use std::sync::Arc;
use std::time::Instant;

use esd_core::StatusStore;

use crate::registry::ClientRegistry;

/// Shared state for the Axum application.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The authoritative ESD status record.
    pub store: Arc<StatusStore>,
    /// Registry of connected observer clients.
    pub registry: Arc<ClientRegistry>,
    /// Process start time, reported by the health endpoint.
    pub started_at: Instant,
}

impl AppState {
    /// Create application state with a fresh store and empty registry.
    pub fn new() -> Self {
        Self {
            store: Arc::new(StatusStore::new()),
            registry: Arc::new(ClientRegistry::new()),
            started_at: Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
