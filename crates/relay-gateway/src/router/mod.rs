//! Event router
//!
//! Single owner of the registry and directory. Every client event, every
//! disconnect and every status query runs under one lock, so the state
//! change an event causes and the fan-out it triggers are atomic with
//! respect to every other event.

mod state;

pub use state::RelayState;

use crate::broadcast::Broadcaster;
use crate::connection::ConnectionManager;
use crate::handlers::{
    DisconnectHandler, HandlerContext, HandlerError, HandlerResult, MessageDispatcher,
};
use crate::protocol::ClientEvent;
use parking_lot::Mutex;
use relay_core::{ConnectionId, ConnectionState, MessageIdGenerator, RoomId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Point-in-time counters for the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    /// Rooms with at least one member
    pub active_rooms: usize,
    /// Connections that joined a room
    pub active_users: usize,
}

/// Routes client events to handlers and fans out the results
pub struct EventRouter {
    state: Mutex<RelayState>,
    connections: Arc<ConnectionManager>,
    broadcaster: Broadcaster,
    message_ids: MessageIdGenerator,
}

impl EventRouter {
    #[must_use]
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self {
            state: Mutex::new(RelayState::new()),
            broadcaster: Broadcaster::new(connections.clone()),
            connections,
            message_ids: MessageIdGenerator::new(),
        }
    }

    /// Handle one decoded client event
    ///
    /// Returns the number of outboxes reached, or why the event was dropped.
    /// Events from a connection the manager no longer lists are dropped, so a
    /// frame still in flight when the socket closes cannot outlive the
    /// disconnect transition.
    pub fn handle(&self, connection_id: &ConnectionId, event: ClientEvent) -> HandlerResult<usize> {
        let event_type = event.event_type();
        let result = self.with_context(connection_id, |ctx| {
            if !self.connections.has_connection(ctx.connection_id) {
                return Err(HandlerError::ConnectionClosed(event_type));
            }
            MessageDispatcher::dispatch(ctx, event)
        });

        if let Ok(recipients) = result {
            tracing::trace!(
                connection_id = %connection_id,
                event = %event_type,
                recipients,
                "Event routed"
            );
        }

        result
    }

    /// Run the disconnect transition for a closed connection
    ///
    /// Call after removing the connection from the manager. Returns the
    /// number of remaining members notified.
    pub fn disconnect(&self, connection_id: &ConnectionId) -> usize {
        self.with_context(connection_id, DisconnectHandler::handle)
            .unwrap_or_default()
    }

    /// Room and user counts
    pub fn stats(&self) -> RelayStats {
        let state = self.state.lock();
        RelayStats {
            active_rooms: state.directory().room_count(),
            active_users: state.registry().len(),
        }
    }

    /// Every room with its member usernames, sorted by room ID
    pub fn list_rooms(&self) -> BTreeMap<RoomId, Vec<String>> {
        self.state.lock().directory().list_rooms()
    }

    /// Current state of one connection
    pub fn connection_state(&self, connection_id: &ConnectionId) -> ConnectionState {
        self.state.lock().registry().state(connection_id)
    }

    fn with_context<F>(&self, connection_id: &ConnectionId, f: F) -> HandlerResult<usize>
    where
        F: FnOnce(&mut HandlerContext<'_>) -> HandlerResult<usize>,
    {
        let mut state = self.state.lock();

        let result = f(&mut HandlerContext {
            connection_id,
            state: &mut *state,
            broadcaster: &self.broadcaster,
            message_ids: &self.message_ids,
        });

        debug_assert!(
            state.is_consistent(),
            "registry and directory disagree after event from {connection_id}"
        );

        result
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRouter")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
