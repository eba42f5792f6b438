//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::Connection;
use crate::events::ServerEvent;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use relay_core::ConnectionId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{interval, MissedTickBehavior};

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let connection_id = ConnectionId::generate();
    let heartbeat_interval = Duration::from_millis(state.config().gateway.heartbeat_interval_ms);
    let idle_timeout = Duration::from_millis(state.config().gateway.idle_timeout_ms);

    // Register connection
    let (connection, outbox) = state
        .connection_manager()
        .add_connection(connection_id.clone());

    tracing::info!(
        connection_id = %connection_id,
        total = state.connection_manager().connection_count(),
        "WebSocket connection established"
    );

    // Split the WebSocket
    let (ws_sink, ws_stream) = socket.split();

    let mut recv_task = tokio::spawn(receive_loop(
        state.clone(),
        connection.clone(),
        ws_stream,
    ));
    let mut send_task = tokio::spawn(send_loop(
        connection_id.clone(),
        outbox,
        ws_sink,
        heartbeat_interval,
    ));
    let mut idle_task = tokio::spawn(idle_monitor(
        connection.clone(),
        heartbeat_interval,
        idle_timeout,
    ));

    // Whichever task ends first ends the connection
    tokio::select! {
        _ = &mut recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = &mut send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
        _ = &mut idle_task => {
            tracing::debug!(connection_id = %connection_id, "Idle monitor ended");
        }
    }

    recv_task.abort();
    send_task.abort();
    idle_task.abort();

    // An aborted task may still be mid-poll on another worker; wait it out
    // so no frame reaches the router after cleanup. The task that won the
    // select has already been awaited and must not be polled again.
    for task in [recv_task, send_task, idle_task] {
        if !task.is_finished() {
            let _ = task.await;
        }
    }

    cleanup_connection(&state, &connection_id);
}

/// Read frames from the client and feed them to the router
async fn receive_loop(
    state: GatewayState,
    connection: Arc<Connection>,
    mut ws_stream: futures_util::stream::SplitStream<WebSocket>,
) {
    let connection_id = connection.id().clone();

    while let Some(msg) = ws_stream.next().await {
        connection.record_activity();

        match msg {
            Ok(Message::Text(text)) => handle_text_message(&state, &connection_id, &text),
            Ok(Message::Binary(_)) => {
                tracing::debug!(connection_id = %connection_id, "Binary frame ignored");
            }
            Ok(Message::Ping(_)) => {
                tracing::trace!(connection_id = %connection_id, "Ping received");
                // Pong is handled automatically by axum
            }
            Ok(Message::Pong(_)) => {
                tracing::trace!(connection_id = %connection_id, "Pong received");
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "Client closed connection");
                return;
            }
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket error"
                );
                return;
            }
        }
    }
}

/// Drain the outbox into the socket and keep the client alive with pings
async fn send_loop(
    connection_id: ConnectionId,
    mut outbox: broadcast::Receiver<ServerEvent>,
    mut ws_sink: futures_util::stream::SplitSink<WebSocket, Message>,
    heartbeat_interval: Duration,
) {
    let mut ping = interval(heartbeat_interval);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ping.tick().await;

    loop {
        let frame = tokio::select! {
            event = outbox.recv() => match event {
                Ok(event) => match event.to_json() {
                    Ok(json) => Message::Text(json),
                    Err(e) => {
                        tracing::warn!(
                            connection_id = %connection_id,
                            event = %event.event_type(),
                            error = %e,
                            "Failed to serialize event"
                        );
                        continue;
                    }
                },
                Err(RecvError::Lagged(dropped)) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        dropped,
                        "Client too slow, oldest events dropped"
                    );
                    continue;
                }
                Err(RecvError::Closed) => break,
            },
            _ = ping.tick() => Message::Ping(Vec::new()),
        };

        if ws_sink.send(frame).await.is_err() {
            tracing::warn!(
                connection_id = %connection_id,
                "Failed to send message to WebSocket"
            );
            break;
        }
    }

    // Close the WebSocket when the outbox is closed
    let _ = ws_sink.close().await;
}

/// Close connections that have gone quiet for longer than the idle timeout
async fn idle_monitor(
    connection: Arc<Connection>,
    heartbeat_interval: Duration,
    idle_timeout: Duration,
) {
    let mut check_interval = interval(heartbeat_interval / 2);

    loop {
        check_interval.tick().await;

        let time_since = connection.time_since_activity();
        if time_since > idle_timeout {
            tracing::warn!(
                connection_id = %connection.id(),
                time_since_ms = time_since.as_millis(),
                "Connection timed out (no inbound frames)"
            );
            break;
        }
    }
}

/// Handle a text frame from the client
///
/// Frames that do not decode and events the router drops are logged and
/// otherwise ignored; the connection stays open.
fn handle_text_message(state: &GatewayState, connection_id: &ConnectionId, text: &str) {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection_id,
                error = %e,
                "Ignoring malformed frame"
            );
            return;
        }
    };

    tracing::trace!(
        connection_id = %connection_id,
        event = %event.event_type(),
        "Received event"
    );

    if let Err(e) = state.router().handle(connection_id, event) {
        tracing::debug!(
            connection_id = %connection_id,
            error = %e,
            "Event ignored"
        );
    }
}

/// Clean up a connection on disconnect
///
/// The connection leaves the manager before the disconnect transition runs,
/// so the router rejects any event for it that is still in flight.
fn cleanup_connection(state: &GatewayState, connection_id: &ConnectionId) {
    tracing::info!(connection_id = %connection_id, "Cleaning up connection");

    let removed = state.connection_manager().remove_connection(connection_id);
    let notified = state.router().disconnect(connection_id);

    if let Some(connection) = removed {
        tracing::debug!(
            connection_id = %connection_id,
            recipients = notified,
            age_ms = connection.age().as_millis(),
            remaining = state.connection_manager().connection_count(),
            "Connection closed"
        );
    }
}
