//! Transport disconnect handler

use super::{HandlerContext, HandlerResult};
use crate::broadcast::Target;
use crate::events::{ServerEvent, UserLeftEvent};

/// Handles a closed connection
pub struct DisconnectHandler;

impl DisconnectHandler {
    /// Remove the connection's session and membership, then tell the room
    ///
    /// Connections that never joined produce nothing. When the leaver was the
    /// last member the room is already gone and nobody is notified.
    pub fn handle(ctx: &mut HandlerContext<'_>) -> HandlerResult<usize> {
        let Some(session) = ctx.state.leave_current_room(ctx.connection_id) else {
            return Ok(0);
        };

        tracing::info!(
            connection_id = %ctx.connection_id,
            room_id = %session.room_id,
            username = %session.username,
            "Left room"
        );

        Ok(ctx.broadcaster.deliver(
            ctx.state.directory(),
            Target::room(session.room_id.as_str()),
            &ServerEvent::UserLeft(UserLeftEvent::new(session.username)),
        ))
    }
}
