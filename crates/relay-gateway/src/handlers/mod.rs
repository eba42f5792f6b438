//! Event handlers
//!
//! One handler per client event, plus the disconnect transition. Handlers run
//! inside the router's critical section and never block.

mod disconnect;
mod error;
mod join_room;
mod message;
mod typing;

pub use disconnect::DisconnectHandler;
pub use error::{HandlerError, HandlerResult};
pub use join_room::JoinRoomHandler;
pub use message::SendMessageHandler;
pub use typing::TypingHandler;

use crate::broadcast::Broadcaster;
use crate::protocol::ClientEvent;
use crate::router::RelayState;
use relay_core::{ConnectionId, MessageIdGenerator};

/// Everything a handler may touch while the router lock is held
pub struct HandlerContext<'a> {
    /// Connection the event came from
    pub connection_id: &'a ConnectionId,
    /// Registry and directory
    pub state: &'a mut RelayState,
    /// Fan-out to outboxes
    pub broadcaster: &'a Broadcaster,
    /// Source of chat message IDs
    pub message_ids: &'a MessageIdGenerator,
}

/// Dispatch decoded client events to the appropriate handler
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle one client event
    pub fn dispatch(ctx: &mut HandlerContext<'_>, event: ClientEvent) -> HandlerResult<usize> {
        match event {
            ClientEvent::JoinRoom(payload) => JoinRoomHandler::handle(ctx, payload),
            ClientEvent::SendMessage(payload) => SendMessageHandler::handle(ctx, payload),
            ClientEvent::TypingStart => TypingHandler::handle(ctx, true),
            ClientEvent::TypingStop => TypingHandler::handle(ctx, false),
        }
    }
}
