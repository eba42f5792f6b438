//! `join-room` handler

use super::{HandlerContext, HandlerResult};
use crate::broadcast::Target;
use crate::events::{ConnectedEvent, ServerEvent, UserJoinedEvent};
use crate::protocol::JoinRoomPayload;
use relay_core::RoomId;

/// Handles `join-room`
pub struct JoinRoomHandler;

impl JoinRoomHandler {
    /// Move the connection into the requested room
    ///
    /// A connection that already belongs to a room leaves it first, so it is
    /// only ever a member of one room. The caller receives `connected` and the
    /// member list; everyone else in the room receives `user-joined`.
    pub fn handle(ctx: &mut HandlerContext<'_>, payload: JoinRoomPayload) -> HandlerResult<usize> {
        let JoinRoomPayload { username, room_id } = payload;
        let room_id = RoomId::from(room_id);

        if let Some(previous) = ctx.state.leave_current_room(ctx.connection_id) {
            tracing::debug!(
                connection_id = %ctx.connection_id,
                from_room = %previous.room_id,
                to_room = %room_id,
                "Leaving previous room"
            );
        }

        ctx.state.join_room(ctx.connection_id, &username, room_id.clone());

        tracing::info!(
            connection_id = %ctx.connection_id,
            room_id = %room_id,
            username = %username,
            "Joined room"
        );

        let directory = ctx.state.directory();
        let caller = Target::Connection(ctx.connection_id);
        let members = directory.list_usernames(room_id.as_str());

        let mut delivered = ctx.broadcaster.deliver(
            directory,
            caller,
            &ServerEvent::Connected(ConnectedEvent::new(room_id.clone(), username.clone())),
        );
        delivered += ctx
            .broadcaster
            .deliver(directory, caller, &ServerEvent::RoomUsers(members));
        delivered += ctx.broadcaster.deliver(
            directory,
            Target::room_except(room_id.as_str(), ctx.connection_id),
            &ServerEvent::UserJoined(UserJoinedEvent::new(username)),
        );

        Ok(delivered)
    }
}
