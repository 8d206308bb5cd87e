//! REST API endpoint handlers for the observer server.
//!
//! All endpoints are read-only views over the [`StatusStore`] accessors;
//! none of them mutates state. Responses use the
//! `{ "success": true, "data": { ... } }` envelope the deployed
//! dashboards already consume.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service banner |
//! | `GET` | `/api/esd/status` | Current status + classification |
//! | `GET` | `/api/esd/safety` | Classification, booleans, `isSafe` flag |
//! | `GET` | `/api/esd/alerts` | Bounded alert history + count |
//! | `GET` | `/api/health` | Process uptime + current status |
//!
//! [`StatusStore`]: esd_core::StatusStore

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::error::ObserverError;
use crate::state::AppState;

/// Wrap endpoint data in the standard success envelope.
fn success(data: serde_json::Value) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": data,
    }))
}

/// `GET /` -- service banner.
#[allow(clippy::unused_async)] // axum handlers must be async
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "ESD Wrist Strap Detection System Backend",
        "status": "running",
        "timestamp": Utc::now(),
    }))
}

/// `GET /api/esd/status` -- current status record plus classification.
pub async fn esd_status(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let (status, classification) = state.store.status_and_classification().await;

    Ok(success(serde_json::json!({
        "status": serde_json::to_value(&status)?,
        "safetyStatus": classification,
        "timestamp": Utc::now(),
    })))
}

/// `GET /api/esd/safety` -- classification, the three sensor booleans,
/// and a derived `isSafe` flag.
pub async fn esd_safety(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let (status, classification) = state.store.status_and_classification().await;

    Ok(success(serde_json::json!({
        "safetyStatus": classification,
        "isSafe": classification.is_safe(),
        "operatorPresent": status.operator_present,
        "wristStrapConnected": status.wrist_strap_connected,
        "properlyGrounded": status.properly_grounded,
        "timestamp": Utc::now(),
    })))
}

/// `GET /api/esd/alerts` -- the bounded alert history, newest first.
pub async fn esd_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let alerts = state.store.alerts().await;

    Ok(success(serde_json::json!({
        "alerts": serde_json::to_value(&alerts)?,
        "alertCount": alerts.len(),
        "timestamp": Utc::now(),
    })))
}

/// `GET /api/health` -- process uptime plus the current status.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let status = state.store.status().await;

    Ok(success(serde_json::json!({
        "status": "healthy",
        "uptimeSecs": state.started_at.elapsed().as_secs(),
        "timestamp": Utc::now(),
        "esdStatus": serde_json::to_value(&status)?,
    })))
}
