//! HTTP status endpoints

use crate::server::GatewayState;
use axum::{extract::State, Json};
use relay_core::{iso_millis, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `GET /api/health` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub active_rooms: usize,
    pub active_users: usize,
}

/// Health check with live room and user counts
pub async fn health_check(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let stats = state.router().stats();

    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: iso_millis::format(&chrono::Utc::now()),
        active_rooms: stats.active_rooms,
        active_users: stats.active_users,
    })
}

/// Every room and its member usernames
pub async fn list_rooms(State(state): State<GatewayState>) -> Json<BTreeMap<RoomId, Vec<String>>> {
    Json(state.router().list_rooms())
}
