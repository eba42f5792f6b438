//! Individual WebSocket connection
//!
//! Transport-side handle for one socket: its ID, its outbound queue and
//! liveness bookkeeping. Room membership lives in the router, not here.

use crate::events::ServerEvent;
use parking_lot::Mutex;
use relay_common::config::MAX_OUTBOUND_BUFFER;
use relay_core::ConnectionId;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// A single WebSocket connection
pub struct Connection {
    /// Unique connection ID
    id: ConnectionId,

    /// Outbound queue drained by the socket writer
    ///
    /// Bounded ring: when the writer falls behind, the oldest events are
    /// overwritten and the writer observes a lag.
    outbox: broadcast::Sender<ServerEvent>,

    /// Last inbound frame of any kind
    last_activity: Mutex<Instant>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection and the receiving end of its outbox
    ///
    /// `capacity` is clamped to `1..=MAX_OUTBOUND_BUFFER`.
    pub fn new(
        id: ConnectionId,
        capacity: usize,
    ) -> (Arc<Self>, broadcast::Receiver<ServerEvent>) {
        let (outbox, receiver) = broadcast::channel(capacity.clamp(1, MAX_OUTBOUND_BUFFER));
        let now = Instant::now();

        let connection = Arc::new(Self {
            id,
            outbox,
            last_activity: Mutex::new(now),
            created_at: now,
        });

        (connection, receiver)
    }

    /// Get the connection ID
    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Queue an event for this connection without waiting
    ///
    /// Returns `false` once the writer has gone away.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.outbox.send(event).is_ok()
    }

    /// Events queued and not yet written
    pub fn queued(&self) -> usize {
        self.outbox.len()
    }

    /// Record an inbound frame
    pub fn record_activity(&self) {
        *self.last_activity.lock() = Instant::now();
    }

    /// Get time since the last inbound frame
    pub fn time_since_activity(&self) -> Duration {
        self.last_activity.lock().elapsed()
    }

    /// Get connection age
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Check if the writer side is gone
    pub fn is_closed(&self) -> bool {
        self.outbox.receiver_count() == 0
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("queued", &self.queued())
            .field("created_at", &self.created_at)
            .finish()
    }
}
