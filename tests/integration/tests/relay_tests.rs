//! WebSocket relay integration tests
//!
//! Drive the relay through real sockets and check what every client sees.
//!
//! Run with: cargo test -p integration-tests --test relay_tests

use std::collections::BTreeMap;
use std::time::Duration;

use integration_tests::{eventually, test_config, unique_room, TestServer, WsClient};
use relay_gateway::events::{ServerEvent, UserJoinedEvent, UserLeftEvent, UserTypingEvent};
use relay_gateway::protocol::ClientEvent;
use relay_gateway::server::HealthResponse;

const QUIET: Duration = Duration::from_millis(200);

async fn rooms(server: &TestServer) -> BTreeMap<String, Vec<String>> {
    server.get_json("/api/rooms").await.unwrap()
}

#[tokio::test]
async fn test_lobby_scenario() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut c1 = WsClient::connect(&server).await.unwrap();
    let mut c2 = WsClient::connect(&server).await.unwrap();

    // C1 joins as alice
    c1.send(&ClientEvent::join_room("alice", "lobby")).await.unwrap();
    match c1.recv().await.unwrap() {
        ServerEvent::Connected(ack) => {
            assert_eq!(ack.room_id.as_str(), "lobby");
            assert_eq!(ack.username, "alice");
            assert_eq!(ack.message, "Connected to room lobby");
        }
        other => panic!("Expected connected, got {other:?}"),
    }
    assert_eq!(
        c1.recv().await.unwrap(),
        ServerEvent::RoomUsers(vec!["alice".to_string()])
    );

    // C2 joins as bob
    assert_eq!(c2.join("bob", "lobby").await.unwrap(), vec!["alice", "bob"]);
    assert_eq!(
        c1.recv().await.unwrap(),
        ServerEvent::UserJoined(UserJoinedEvent::new("bob"))
    );

    // C1 says hi; both receive it
    c1.send(&ClientEvent::send_message("hi")).await.unwrap();
    for client in [&mut c1, &mut c2] {
        match client.recv().await.unwrap() {
            ServerEvent::ReceiveMessage(message) => {
                assert_eq!(message.username, "alice");
                assert_eq!(message.message, "hi");
                assert_eq!(message.room_id.as_str(), "lobby");
            }
            other => panic!("Expected receive-message, got {other:?}"),
        }
    }

    // C1 leaves
    c1.close().await.unwrap();
    assert_eq!(
        c2.recv().await.unwrap(),
        ServerEvent::UserLeft(UserLeftEvent::new("alice"))
    );
    assert_eq!(
        rooms(&server).await,
        BTreeMap::from([("lobby".to_string(), vec!["bob".to_string()])])
    );

    // C2 leaves; nothing is left
    c2.close().await.unwrap();
    let server = &server;
    eventually(move || async move { Ok(rooms(server).await.is_empty()) })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_message_reaches_only_own_room() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (red, blue) = (unique_room(), unique_room());

    let mut alice = WsClient::connect(&server).await.unwrap();
    let mut bob = WsClient::connect(&server).await.unwrap();
    alice.join("alice", &red).await.unwrap();
    bob.join("bob", &blue).await.unwrap();

    alice.send(&ClientEvent::send_message("red only")).await.unwrap();

    assert!(matches!(
        alice.recv().await.unwrap(),
        ServerEvent::ReceiveMessage(m) if m.message == "red only"
    ));
    bob.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_message_ids_increase() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut alice = WsClient::connect(&server).await.unwrap();
    alice.join("alice", &unique_room()).await.unwrap();

    let mut ids = Vec::new();
    for text in ["one", "two", "three"] {
        alice.send(&ClientEvent::send_message(text)).await.unwrap();
        match alice.recv().await.unwrap() {
            ServerEvent::ReceiveMessage(message) => ids.push(message.id),
            other => panic!("Expected receive-message, got {other:?}"),
        }
    }

    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_rejoin_transfers_room() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (first, second) = (unique_room(), unique_room());

    let mut alice = WsClient::connect(&server).await.unwrap();
    let mut bob = WsClient::connect(&server).await.unwrap();
    bob.join("bob", &first).await.unwrap();
    alice.join("alice", &first).await.unwrap();
    bob.recv().await.unwrap(); // user-joined alice

    assert_eq!(alice.join("alice", &second).await.unwrap(), vec!["alice"]);

    let listed = rooms(&server).await;
    assert_eq!(listed[&first], vec!["bob"]);
    assert_eq!(listed[&second], vec!["alice"]);

    // Messages in the old room no longer reach alice
    bob.send(&ClientEvent::send_message("still here?")).await.unwrap();
    bob.recv().await.unwrap();
    alice.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_rejoin_same_room_keeps_single_entry() {
    let server = TestServer::start().await.expect("Failed to start server");
    let room = unique_room();

    let mut alice = WsClient::connect(&server).await.unwrap();
    alice.join("alice", &room).await.unwrap();
    assert_eq!(alice.join("alice", &room).await.unwrap(), vec!["alice"]);

    assert_eq!(rooms(&server).await[&room], vec!["alice"]);
}

#[tokio::test]
async fn test_typing_excludes_sender() {
    let server = TestServer::start().await.expect("Failed to start server");
    let room = unique_room();

    let mut alice = WsClient::connect(&server).await.unwrap();
    let mut bob = WsClient::connect(&server).await.unwrap();
    alice.join("alice", &room).await.unwrap();
    bob.join("bob", &room).await.unwrap();
    alice.recv().await.unwrap(); // user-joined bob

    alice.send(&ClientEvent::TypingStart).await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ServerEvent::UserTyping(UserTypingEvent::new("alice", true))
    );

    alice.send(&ClientEvent::TypingStop).await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap(),
        ServerEvent::UserTyping(UserTypingEvent::new("alice", false))
    );

    alice.expect_silence(QUIET).await.unwrap();
}

#[tokio::test]
async fn test_events_before_join_are_ignored() {
    let server = TestServer::start().await.expect("Failed to start server");
    let room = unique_room();

    let mut bob = WsClient::connect(&server).await.unwrap();
    bob.join("bob", &room).await.unwrap();

    let mut stranger = WsClient::connect(&server).await.unwrap();
    stranger.send(&ClientEvent::send_message("anyone?")).await.unwrap();
    stranger.send(&ClientEvent::TypingStart).await.unwrap();

    stranger.expect_silence(QUIET).await.unwrap();
    bob.expect_silence(QUIET).await.unwrap();

    // The connection is still usable
    assert_eq!(stranger.join("stranger", &room).await.unwrap(), vec!["bob", "stranger"]);
}

#[tokio::test]
async fn test_bad_frames_are_ignored() {
    let server = TestServer::start().await.expect("Failed to start server");
    let mut client = WsClient::connect(&server).await.unwrap();

    client.send_raw("not json").await.unwrap();
    client.send_raw(r#"{"event":"shout","data":{}}"#).await.unwrap();
    client.send_raw(r#"{"event":"user-joined","data":{}}"#).await.unwrap();
    client.send_raw(r#"{"event":"join-room","data":{"username":"x"}}"#).await.unwrap();
    client.send_binary(vec![1, 2, 3]).await.unwrap();

    client.expect_silence(QUIET).await.unwrap();
    assert_eq!(client.join("alice", &unique_room()).await.unwrap(), vec!["alice"]);
}

#[tokio::test]
async fn test_disconnect_without_join_is_silent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let room = unique_room();

    let mut bob = WsClient::connect(&server).await.unwrap();
    bob.join("bob", &room).await.unwrap();

    let lurker = WsClient::connect(&server).await.unwrap();
    lurker.close().await.unwrap();

    bob.expect_silence(QUIET).await.unwrap();
    assert_eq!(rooms(&server).await[&room], vec!["bob"]);
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    let config =
        test_config(&[("HEARTBEAT_INTERVAL_MS", "50"), ("IDLE_TIMEOUT_MS", "150")]).unwrap();
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");
    let server = &server;

    let mut bob = WsClient::connect(server).await.unwrap();
    bob.join("bob", &unique_room()).await.unwrap();

    // bob stops reading, so server pings go unanswered and nothing arrives inbound
    eventually(move || async move {
        let health: HealthResponse = server.get_json("/api/health").await?;
        Ok(health.active_users == 0 && health.active_rooms == 0)
    })
    .await
    .unwrap();
}
