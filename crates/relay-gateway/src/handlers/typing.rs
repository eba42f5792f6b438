//! `typing-start` / `typing-stop` handler

use super::{HandlerContext, HandlerError, HandlerResult};
use crate::broadcast::Target;
use crate::events::{EventType, ServerEvent, UserTypingEvent};

/// Handles typing indicators
pub struct TypingHandler;

impl TypingHandler {
    /// Tell the rest of the room whether this user is typing
    pub fn handle(ctx: &mut HandlerContext<'_>, is_typing: bool) -> HandlerResult<usize> {
        let event_type = if is_typing {
            EventType::TypingStart
        } else {
            EventType::TypingStop
        };

        let session = ctx
            .state
            .registry()
            .get_session(ctx.connection_id)
            .ok_or(HandlerError::NotJoined(event_type))?;

        Ok(ctx.broadcaster.deliver(
            ctx.state.directory(),
            Target::room_except(session.room_id.as_str(), ctx.connection_id),
            &ServerEvent::UserTyping(UserTypingEvent::new(session.username.clone(), is_typing)),
        ))
    }
}
