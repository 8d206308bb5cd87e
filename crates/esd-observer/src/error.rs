//! Error types for the observer API server.
//!
//! [`ObserverError`] unifies the REST-path failure modes into a single
//! enum that converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! `WebSocket`-path errors never use this type; they are handled locally
//! inside the connection task and at worst close that one connection.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the observer REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Serialization(e) => format!("JSON error: {e}"),
            Self::Internal(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
        });

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
