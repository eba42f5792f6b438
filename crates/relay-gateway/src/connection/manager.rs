//! Connection manager
//!
//! Tracks every open WebSocket connection using `DashMap` for thread-safe access.

use super::Connection;
use crate::events::ServerEvent;
use dashmap::DashMap;
use relay_core::ConnectionId;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by ID
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// Outbox capacity for new connections
    outbound_buffer: usize,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new(outbound_buffer: usize) -> Self {
        Self {
            connections: DashMap::new(),
            outbound_buffer,
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared(outbound_buffer: usize) -> Arc<Self> {
        Arc::new(Self::new(outbound_buffer))
    }

    /// Register a new connection
    ///
    /// Returns the connection and the receiver its socket writer drains.
    pub fn add_connection(
        &self,
        id: ConnectionId,
    ) -> (Arc<Connection>, broadcast::Receiver<ServerEvent>) {
        let (connection, receiver) = Connection::new(id.clone(), self.outbound_buffer);
        self.connections.insert(id.clone(), connection.clone());

        tracing::debug!(connection_id = %id, "Connection added");

        (connection, receiver)
    }

    /// Remove a connection
    pub fn remove_connection(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        let removed = self.connections.remove(id).map(|(_, connection)| connection);

        if removed.is_some() {
            tracing::debug!(connection_id = %id, "Connection removed");
        }

        removed
    }

    /// Get a connection by ID
    pub fn get_connection(&self, id: &ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(id).map(|r| r.clone())
    }

    /// Queue an event for one connection
    ///
    /// Unknown or closed connections are skipped. Returns whether the event was queued.
    pub fn send_to(&self, id: &ConnectionId, event: ServerEvent) -> bool {
        let Some(connection) = self.get_connection(id) else {
            tracing::trace!(connection_id = %id, "Send to unknown connection skipped");
            return false;
        };

        connection.send(event)
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Check if a connection exists
    pub fn has_connection(&self, id: &ConnectionId) -> bool {
        self.connections.contains_key(id)
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("outbound_buffer", &self.outbound_buffer)
            .finish()
    }
}
