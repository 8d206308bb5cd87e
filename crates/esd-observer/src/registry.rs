//! Explicit registry of connected observer clients with liveness sweeping.
//!
//! Each `WebSocket` connection task registers a [`ClientHandle`] on accept
//! and unregisters it on close or error. The handle owns the sending half
//! of an unbounded queue of outbound frames; the connection task drains
//! the queue onto the socket, so nothing that enqueues a frame ever
//! blocks on network I/O.
//!
//! # Liveness sweep
//!
//! On a fixed interval every client is marked awaiting-pong and sent a
//! ping; receipt of a pong clears the mark. A client still marked on the
//! *next* sweep tick (no pong since the previous probe) is closed and
//! unregistered. One missed response is tolerated, two consecutive misses
//! are not -- the standard heartbeat pattern with an effective timeout of
//! twice the sweep period.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::Message;
use esd_types::ClientId;
use tokio::sync::Mutex;
use tokio::sync::mpsc::error::SendError;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// How often the liveness sweep probes registered clients.
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(30);

/// The registry's view of one connected observer client.
#[derive(Debug)]
pub struct ClientHandle {
    /// Unique identifier for this connection.
    id: ClientId,
    /// Outbound frame queue drained by the connection task.
    tx: tokio::sync::mpsc::UnboundedSender<Message>,
    /// Set when a ping is sent, cleared when the pong arrives.
    awaiting_pong: AtomicBool,
}

impl ClientHandle {
    /// This connection's identifier.
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Enqueue a frame for delivery to this client.
    ///
    /// Never blocks. Fails only when the connection task has already
    /// ended and dropped the receiving half.
    pub fn send(&self, message: Message) -> Result<(), SendError<Message>> {
        self.tx.send(message)
    }
}

/// Tracks every currently connected observer client.
///
/// All operations serialize on one internal lock; the sweep timer and the
/// ingest path can therefore mutate the registry concurrently without
/// coordination. Iteration works over a cloned handle list so a client
/// that disconnects mid-iteration is simply skipped, not an error.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    /// Live client handles keyed by connection ID.
    clients: Mutex<HashMap<ClientId, Arc<ClientHandle>>>,
}

impl ClientRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client around its outbound frame queue.
    pub async fn register(
        &self,
        tx: tokio::sync::mpsc::UnboundedSender<Message>,
    ) -> Arc<ClientHandle> {
        let handle = Arc::new(ClientHandle {
            id: ClientId::new(),
            tx,
            awaiting_pong: AtomicBool::new(false),
        });
        self.clients.lock().await.insert(handle.id, Arc::clone(&handle));
        debug!(client = %handle.id, "observer client registered");
        handle
    }

    /// Remove a client. Unregistering an absent client is a no-op.
    pub async fn unregister(&self, id: ClientId) {
        if self.clients.lock().await.remove(&id).is_some() {
            debug!(client = %id, "observer client unregistered");
        }
    }

    /// Whether a client with this ID is currently registered.
    pub async fn contains(&self, id: ClientId) -> bool {
        self.clients.lock().await.contains_key(&id)
    }

    /// Number of currently registered clients.
    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Whether no clients are registered.
    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }

    /// Snapshot the current handles.
    ///
    /// The lock is released before the caller touches any handle, so a
    /// slow consumer can never stall registration or the sweep.
    pub async fn handles(&self) -> Vec<Arc<ClientHandle>> {
        self.clients.lock().await.values().map(Arc::clone).collect()
    }

    /// Apply `f` to every currently registered client.
    ///
    /// A client that becomes invalid mid-iteration is skipped by `f`'s
    /// own send-failure handling; removal is left to the close handler or
    /// the liveness sweep.
    pub async fn for_each<F: FnMut(&ClientHandle)>(&self, mut f: F) {
        for handle in self.handles().await {
            f(&handle);
        }
    }

    /// Clear the awaiting-pong mark for a client after its pong arrived.
    pub async fn mark_alive(&self, id: ClientId) {
        let clients = self.clients.lock().await;
        if let Some(handle) = clients.get(&id) {
            handle.awaiting_pong.store(false, Ordering::SeqCst);
        }
    }

    /// Run one liveness sweep tick.
    ///
    /// Clients still awaiting a pong from the previous tick are closed
    /// and unregistered; everyone else is marked awaiting and sent a
    /// ping.
    pub async fn sweep_once(&self) {
        for handle in self.handles().await {
            if handle.awaiting_pong.swap(true, Ordering::SeqCst) {
                info!(client = %handle.id, "evicting unresponsive observer client");
                // Best effort: the connection task closes the socket when
                // it drains this frame. If the task is already gone the
                // send fails, which is fine.
                let _ = handle.send(Message::Close(None));
                self.unregister(handle.id).await;
            } else if handle.send(Message::Ping(Bytes::new())).is_err() {
                debug!(client = %handle.id, "ping skipped, connection task already ended");
            }
        }
    }
}

/// Drive [`ClientRegistry::sweep_once`] on a fixed period until the task
/// is aborted or the runtime shuts down.
pub fn spawn_sweep(registry: Arc<ClientRegistry>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; it only marks clients
        // pending, so no one can be evicted before one full period.
        loop {
            ticker.tick().await;
            registry.sweep_once().await;
        }
    })
}
