//! `WebSocket` handler for the persistent sensor/observer connection.
//!
//! Every connection on `GET /ws` is registered as an observer and
//! immediately receives the current status. The same connection may also
//! feed sensor readings and commands; the original deployment has the
//! sensor bridge and the dashboards all attached to this one endpoint.
//!
//! A connection is `CONNECTED` from accept until a close frame, a
//! transport error, or a failed send, after which the task unregisters
//! the client and ends (`CLOSED`). Malformed input never closes the
//! connection; it is answered with an `error` message.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use esd_types::{InboundMessage, OutboundMessage};
use tracing::{debug, info, warn};

use crate::broadcast::broadcast_status;
use crate::registry::ClientHandle;
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Serialize an outbound message onto a client's frame queue.
///
/// Best effort: a failure means the connection task has already ended,
/// which the registry cleanup paths handle.
fn enqueue(handle: &ClientHandle, message: &OutboundMessage) {
    match serde_json::to_string(message) {
        Ok(payload) => {
            if handle.send(Message::Text(payload.into())).is_err() {
                debug!(client = %handle.id(), "dropping message to closed client");
            }
        }
        Err(e) => warn!(error = %e, "failed to serialize outbound message"),
    }
}

/// Run one connection's lifecycle: register, push the current status,
/// then pump frames until the connection closes.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let (tx, mut outbound) = tokio::sync::mpsc::unbounded_channel();
    let handle = state.registry.register(tx).await;
    info!(client = %handle.id(), "WebSocket connection opened");

    // Send the current status to the new client.
    let (status, classification) = state.store.status_and_classification().await;
    enqueue(&handle, &OutboundMessage::status_update(status, classification));

    loop {
        tokio::select! {
            // Drain queued frames (broadcasts, replies, sweep pings) onto
            // the socket.
            queued = outbound.recv() => {
                let Some(frame) = queued else { break };
                let closing = matches!(frame, Message::Close(_));
                if socket.send(frame).await.is_err() {
                    debug!(client = %handle.id(), "send failed, closing connection");
                    break;
                }
                if closing {
                    // The liveness sweep evicted this client.
                    break;
                }
            }
            // Process inbound traffic from the sensor bridge or observer.
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = process_message(&state, text.as_str()).await {
                            enqueue(&handle, &reply);
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {
                        state.registry.mark_alive(handle.id()).await;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(client = %handle.id(), "pong failed, closing connection");
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(client = %handle.id(), "WebSocket closed by peer");
                        break;
                    }
                    Some(Err(e)) => {
                        debug!(client = %handle.id(), error = %e, "WebSocket transport error");
                        break;
                    }
                    Some(Ok(Message::Binary(_))) => {
                        // Binary frames carry no meaning here; ignore.
                    }
                }
            }
        }
    }

    state.registry.unregister(handle.id()).await;
    info!(client = %handle.id(), "WebSocket connection closed");
}

/// Handle one inbound text frame and return the direct reply, if any.
///
/// - Sensor data applies the reading, broadcasts the new status to every
///   registered client, and acknowledges to the sender only.
/// - `get_status`, `get_alerts`, and `clear_alerts` commands reply to the
///   sender; unrecognized command names are silently ignored (this
///   matches the deployed sensor protocol, which observers depend on).
/// - Unparseable input gets an `error` reply and the connection stays
///   open.
pub async fn process_message(state: &AppState, raw: &str) -> Option<OutboundMessage> {
    let parsed: InboundMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "message handling error");
            return Some(OutboundMessage::error("Invalid message format"));
        }
    };

    match parsed {
        InboundMessage::SensorData {
            ir_sensor,
            touch_sensor,
            ground_status,
        } => {
            let outcome = state
                .store
                .apply_reading(ir_sensor == 1, touch_sensor == 1, ground_status == 1)
                .await;
            debug!(
                classification = %outcome.classification,
                changed_fields = outcome.changed.len(),
                "sensor reading applied"
            );
            // Broadcast on every reading, changed or not; observers rely
            // on the update as a heartbeat.
            broadcast_status(&state.store, &state.registry).await;
            Some(OutboundMessage::data_ack())
        }
        InboundMessage::SystemCommand { command } => match command.as_str() {
            "get_status" => {
                let (status, classification) = state.store.status_and_classification().await;
                Some(OutboundMessage::status_response(status, classification))
            }
            "get_alerts" => Some(OutboundMessage::alerts_response(state.store.alerts().await)),
            "clear_alerts" => {
                state.store.clear_alerts().await;
                info!("alert history cleared by command");
                Some(OutboundMessage::alerts_cleared())
            }
            other => {
                debug!(command = other, "ignoring unrecognized system command");
                None
            }
        },
    }
}
