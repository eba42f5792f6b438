//! HTTP API integration tests
//!
//! Each test starts its own relay on an ephemeral port; no external services
//! are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::collections::BTreeMap;

use integration_tests::{
    assert_status, static_dir_with_index, test_config, unique_room, TestServer, WsClient,
};
use relay_gateway::server::{HealthResponse, REQUEST_ID_HEADER};
use reqwest::StatusCode;

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_on_idle_server() {
    let server = TestServer::start().await.expect("Failed to start server");

    let health: HealthResponse = server.get_json("/api/health").await.unwrap();

    assert_eq!(health.status, "OK");
    assert_eq!(health.active_rooms, 0);
    assert_eq!(health.active_users, 0);
    assert!(health.timestamp.ends_with('Z'));
}

#[tokio::test]
async fn test_health_counts_joined_users_only() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut alice = WsClient::connect(&server).await.unwrap();
    let mut bob = WsClient::connect(&server).await.unwrap();
    let mut carol = WsClient::connect(&server).await.unwrap();
    let _lurker = WsClient::connect(&server).await.unwrap();

    alice.join("alice", "red").await.unwrap();
    bob.join("bob", "red").await.unwrap();
    carol.join("carol", "blue").await.unwrap();

    let health: HealthResponse = server.get_json("/api/health").await.unwrap();
    assert_eq!(health.active_rooms, 2);
    assert_eq!(health.active_users, 3);
}

#[tokio::test]
async fn test_health_uses_camel_case_fields() {
    let server = TestServer::start().await.expect("Failed to start server");

    let body: serde_json::Value = server.get_json("/api/health").await.unwrap();

    assert!(body.get("activeRooms").is_some());
    assert!(body.get("activeUsers").is_some());
    assert!(body.get("active_rooms").is_none());
}

// ============================================================================
// Rooms
// ============================================================================

#[tokio::test]
async fn test_rooms_empty() {
    let server = TestServer::start().await.expect("Failed to start server");

    let body: serde_json::Value = server.get_json("/api/rooms").await.unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn test_rooms_lists_members_in_join_order() {
    let server = TestServer::start().await.expect("Failed to start server");
    let room = unique_room();

    let mut alice = WsClient::connect(&server).await.unwrap();
    let mut bob = WsClient::connect(&server).await.unwrap();
    alice.join("alice", &room).await.unwrap();
    bob.join("bob", &room).await.unwrap();

    let rooms: BTreeMap<String, Vec<String>> = server.get_json("/api/rooms").await.unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[&room], vec!["alice", "bob"]);
}

// ============================================================================
// Middleware
// ============================================================================

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/health").await.unwrap();
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .get(format!("{}/api/health", server.base_url()))
        .header(REQUEST_ID_HEADER, "test-request-1")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()[REQUEST_ID_HEADER].to_str().unwrap(),
        "test-request-1"
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .get(format!("{}/api/rooms", server.base_url()))
        .header("Origin", "http://example.test")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"].to_str().unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_to_configured_origins() {
    let config = test_config(&[("CORS_ALLOWED_ORIGINS", "http://allowed.test")]).unwrap();
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");

    let allowed = server
        .client
        .get(format!("{}/api/rooms", server.base_url()))
        .header("Origin", "http://allowed.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"].to_str().unwrap(),
        "http://allowed.test"
    );

    let denied = server
        .client
        .get(format!("{}/api/rooms", server.base_url()))
        .header("Origin", "http://other.test")
        .send()
        .await
        .unwrap();
    assert!(!denied.headers().contains_key("access-control-allow-origin"));
}

// ============================================================================
// Static files
// ============================================================================

#[tokio::test]
async fn test_static_index_served_at_root() {
    let dir = static_dir_with_index("<h1>chat</h1>").unwrap();
    let config = test_config(&[("STATIC_DIR", dir.to_str().unwrap())]).unwrap();
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");

    let response = server.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<h1>chat</h1>");

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_missing_static_dir_returns_not_found() {
    let config = test_config(&[("STATIC_DIR", "/nonexistent/chat-relay-static")]).unwrap();
    let server = TestServer::start_with_config(config).await.expect("Failed to start server");

    let response = server.get("/").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // API routes are unaffected
    let response = server.get("/api/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
