mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn root_reports_running() {
    let app = TestApp::new();

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shopping website backend is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn api_test_reports_database_state() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "API is working", "database": "connected" }));

    app.store.set_failing(true);
    let (status, body) = app.get("/api/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn health_reports_uptime_and_timestamp() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/nope?x=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "message": "API route not found", "path": "/api/nope?x=1" })
    );
}

#[tokio::test]
async fn wrong_method_is_json_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/login", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "API route not found", "path": "/login" }));

    let (status, body) = app.get("/api/auth/register", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "message": "API route not found", "path": "/api/auth/register" })
    );

    let (status, body) = app.post_json("/health", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/health");
}

#[tokio::test(start_paused = true)]
async fn slow_request_times_out_with_json() {
    let app = TestApp::with_timeout(Duration::from_secs(1));
    app.store.set_delay(Duration::from_secs(60));

    let (status, body) = app.get("/api/test", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({ "message": "Request timeout" }));

    app.store.set_delay(Duration::ZERO);
    let (status, _) = app.get("/api/test", None).await;
    assert_eq!(status, StatusCode::OK);
}
