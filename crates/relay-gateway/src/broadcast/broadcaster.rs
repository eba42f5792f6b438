//! Event broadcaster
//!
//! Fans a server event out to one connection or to the members of a room.

use crate::connection::ConnectionManager;
use crate::events::ServerEvent;
use relay_core::{ConnectionId, RoomDirectory};
use std::sync::Arc;

/// Who receives an event
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// Exactly one connection
    Connection(&'a ConnectionId),
    /// Every member of a room, optionally skipping one connection
    Room {
        room_id: &'a str,
        except: Option<&'a ConnectionId>,
    },
}

impl<'a> Target<'a> {
    /// Every member of the room
    #[must_use]
    pub fn room(room_id: &'a str) -> Self {
        Self::Room {
            room_id,
            except: None,
        }
    }

    /// Every member of the room except one connection
    #[must_use]
    pub fn room_except(room_id: &'a str, except: &'a ConnectionId) -> Self {
        Self::Room {
            room_id,
            except: Some(except),
        }
    }
}

/// Delivers events to connection outboxes
///
/// Never blocks: each recipient gets its own bounded queue, so a slow reader
/// only loses its own oldest events.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    connections: Arc<ConnectionManager>,
}

impl Broadcaster {
    #[must_use]
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Deliver an event to a target
    ///
    /// Room membership is read from `directory`, so the caller decides which
    /// snapshot of the room the event reaches. Returns the number of
    /// connections the event was queued for.
    pub fn deliver(
        &self,
        directory: &RoomDirectory,
        target: Target<'_>,
        event: &ServerEvent,
    ) -> usize {
        let delivered = match target {
            Target::Connection(id) => usize::from(self.connections.send_to(id, event.clone())),
            Target::Room { room_id, except } => {
                let Some(room) = directory.room(room_id) else {
                    return 0;
                };

                room.members()
                    .iter()
                    .filter(|member| Some(&member.connection_id) != except)
                    .filter(|member| self.connections.send_to(&member.connection_id, event.clone()))
                    .count()
            }
        };

        tracing::trace!(
            event = %event.event_type(),
            delivered,
            "Event delivered"
        );

        delivered
    }
}
