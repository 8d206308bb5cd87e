//! Axum router construction for the observer API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the observer server.
///
/// The router includes:
/// - `GET /` -- service banner
/// - `GET /ws` -- `WebSocket` sensor/observer connection
/// - `GET /api/esd/status` -- current status + classification
/// - `GET /api/esd/safety` -- classification + booleans + `isSafe`
/// - `GET /api/esd/alerts` -- bounded alert history
/// - `GET /api/health` -- process uptime + current status
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Service banner
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_handler))
        // REST API
        .route("/api/esd/status", get(handlers::esd_status))
        .route("/api/esd/safety", get(handlers::esd_safety))
        .route("/api/esd/alerts", get(handlers::esd_alerts))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
