// # Routes Module
//
// - HTTP route handlers, grouped by functionality.
//
//  ## Available Route Modules
// - `health`: liveness and readiness checks
// - `auth`: register, login, logout
// - `users`: profile and admin user listing

use axum::{Json, http::{StatusCode, Uri}, response::IntoResponse};
use serde_json::json;

/// Health check and monitoring endpoints
pub mod health;

/// Credential endpoints
pub mod auth;

/// Authenticated user endpoints
pub mod users;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "API route not found", "path": path })),
    )
}
