//! WebSocket test client
//!
//! Speaks the relay's JSON envelope over a real socket.

use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use relay_gateway::events::ServerEvent;
use relay_gateway::protocol::ClientEvent;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::TestServer;

/// How long to wait for an expected event
const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// A connected WebSocket client
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    /// Open a WebSocket to the test server
    pub async fn connect(server: &TestServer) -> Result<Self> {
        let (stream, _response) = connect_async(server.ws_url())
            .await
            .context("WebSocket handshake failed")?;
        Ok(Self { stream })
    }

    /// Send a client event
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = event.to_message().to_json()?;
        self.send_raw(json).await
    }

    /// Send an arbitrary text frame
    pub async fn send_raw(&mut self, text: impl Into<String>) -> Result<()> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Send a binary frame
    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.stream.send(Message::Binary(bytes)).await?;
        Ok(())
    }

    /// Wait for the next server event, skipping control frames
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        tokio::time::timeout(RECV_TIMEOUT, self.next_event())
            .await
            .context("Timed out waiting for server event")?
    }

    /// Assert no event arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) -> Result<()> {
        match tokio::time::timeout(wait, self.next_event()).await {
            Err(_) => Ok(()),
            Ok(event) => anyhow::bail!("Expected no event, got {:?}", event?),
        }
    }

    /// Join a room and consume the `connected` and `room-users` replies
    ///
    /// Returns the member list the server reported.
    pub async fn join(&mut self, username: &str, room_id: &str) -> Result<Vec<String>> {
        self.send(&ClientEvent::join_room(username, room_id)).await?;

        match self.recv().await? {
            ServerEvent::Connected(ack) if ack.room_id.as_str() == room_id => {}
            other => anyhow::bail!("Expected connected, got {other:?}"),
        }

        match self.recv().await? {
            ServerEvent::RoomUsers(users) => Ok(users),
            other => anyhow::bail!("Expected room-users, got {other:?}"),
        }
    }

    /// Close the socket
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }

    async fn next_event(&mut self) -> Result<ServerEvent> {
        loop {
            let frame = self
                .stream
                .next()
                .await
                .context("Connection closed")??;

            match frame {
                Message::Text(text) => return Ok(ServerEvent::from_json(&text)?),
                Message::Close(_) => anyhow::bail!("Server closed the connection"),
                _ => {}
            }
        }
    }
}
