//! `send-message` handler

use super::{HandlerContext, HandlerError, HandlerResult};
use crate::broadcast::Target;
use crate::events::{EventType, ServerEvent};
use crate::protocol::SendMessagePayload;
use relay_core::ChatMessage;

/// Handles `send-message`
pub struct SendMessageHandler;

impl SendMessageHandler {
    /// Broadcast a chat message to the sender's room, sender included
    pub fn handle(
        ctx: &mut HandlerContext<'_>,
        payload: SendMessagePayload,
    ) -> HandlerResult<usize> {
        let session = ctx
            .state
            .registry()
            .get_session(ctx.connection_id)
            .ok_or(HandlerError::NotJoined(EventType::SendMessage))?;

        let room_id = session.room_id.clone();
        let message = ChatMessage::new(
            ctx.message_ids.generate(),
            session.username.clone(),
            payload.message,
            room_id.clone(),
        );

        tracing::debug!(
            connection_id = %ctx.connection_id,
            room_id = %room_id,
            message_id = %message.id,
            "Message received"
        );

        Ok(ctx.broadcaster.deliver(
            ctx.state.directory(),
            Target::room(room_id.as_str()),
            &ServerEvent::ReceiveMessage(message),
        ))
    }
}
