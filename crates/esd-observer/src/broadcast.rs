//! Fan-out of status updates to every registered observer.

use axum::extract::ws::Message;
use esd_core::StatusStore;
use esd_types::OutboundMessage;
use tracing::{debug, warn};

use crate::registry::ClientRegistry;

/// Push the current status and classification to every registered client.
///
/// The status and its classification are read under one lock and
/// serialized once; every recipient gets the identical byte sequence, so
/// the classification can never drift mid-broadcast. A send failure on an
/// individual client is logged and skipped -- it neither aborts delivery
/// to the remaining clients nor surfaces to the caller. Cleanup of dead
/// clients is the close handler's and liveness sweep's job.
pub async fn broadcast_status(store: &StatusStore, registry: &ClientRegistry) {
    let (status, classification) = store.status_and_classification().await;
    let message = OutboundMessage::status_update(status, classification);

    let payload = match serde_json::to_string(&message) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "failed to serialize status broadcast");
            return;
        }
    };

    let mut delivered = 0_usize;
    registry
        .for_each(|client| match client.send(Message::Text(payload.clone().into())) {
            Ok(()) => delivered = delivered.saturating_add(1),
            Err(_) => {
                debug!(client = %client.id(), "skipping closed client during broadcast");
            }
        })
        .await;

    debug!(delivered, %classification, "status broadcast");
}
