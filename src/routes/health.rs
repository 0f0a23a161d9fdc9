use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{Value, json};

use crate::server::AppState;

/// Root liveness endpoint.
///
/// # Route
/// - **Method**: GET
/// - **Path**: `/`
///
/// # Response Format
/// ```json
/// { "message": "Shopping website backend is running", "timestamp": "2025-01-01T00:00:00Z" }
/// ```
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Shopping website backend is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// API reachability check, including a round-trip to the database.
///
/// Always answers 200; the `database` field reports `connected` or
/// `disconnected` so a frontend can tell which half is broken.
pub async fn api_test(State(state): State<AppState>) -> Json<Value> {
    let database = match state.store.health_check().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Database health check failed: {:#}", e);
            "disconnected"
        }
    };
    Json(json!({ "message": "API is working", "database": database }))
}

/// Health check endpoint handler.
///
/// Used by load balancers and container health checks. Reports process uptime in
/// seconds and the current time in epoch milliseconds.
///
/// # Examples
/// ```bash
/// curl http://localhost:5000/health
/// # Response: {"status":"OK","uptime":12.5,"timestamp":1735689600000}
/// ```
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "timestamp": Utc::now().timestamp_millis(),
    }))
}
