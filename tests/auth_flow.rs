mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::json;
use shop_auth_server::auth::JwtService;
use shop_auth_server::database::UserStore;

#[tokio::test]
async fn register_creates_user_without_echoing_secrets() {
    let app = TestApp::new();

    let (status, body) = app.register("alice", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "User registered successfully" }));

    let user = app.store.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(user.password_hash, "secret123");
    assert!(!user.password_hash.contains("secret123"));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = TestApp::new();
    app.register("alice", "secret123").await;

    let (status, body) = app.register("alice", "another").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "User already exists" }));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn login_returns_token_for_registered_id() {
    let app = TestApp::new();
    app.register("alice", "secret123").await;
    let id = app.store.find_by_username("alice").await.unwrap().unwrap().id;

    let (status, body) = app.login("alice", "secret123").await;
    assert_eq!(status, StatusCode::OK);

    let token = body["token"].as_str().unwrap();
    let claims = app.state.jwt_service.decode_claims(token).unwrap();
    assert_eq!(claims.sub, id);
}

#[tokio::test]
async fn bad_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::new();
    app.register("alice", "secret123").await;

    let wrong_password = app.login("alice", "wrong").await;
    let unknown_user = app.login("bob", "secret123").await;

    assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
    assert_eq!(
        wrong_password.1,
        json!({ "message": "Invalid username or password" })
    );
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn auth_routes_are_also_under_api_prefix() {
    let app = TestApp::new();

    let (status, _) = app
        .post_json(
            "/api/auth/register",
            json!({ "username": "carol", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_json(
            "/api/auth/login",
            json!({ "username": "carol", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn logout_is_a_plain_acknowledgement() {
    let app = TestApp::new();
    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Logged out successfully" }));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/register", json!({ "username": "alice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid request body" }));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn storage_failure_hides_detail_in_production() {
    let app = TestApp::new();
    app.store.set_failing(true);

    let (status, body) = app.register("alice", "secret123").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal server error" }));
}

#[tokio::test]
async fn storage_failure_shows_detail_in_development() {
    let app = TestApp::development();
    app.store.set_failing(true);

    let (status, body) = app.login("alice", "secret123").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn profile_accepts_token_from_query_parameter() {
    let app = TestApp::new();
    let (id, token) = app.signed_in_user("alice", "secret123").await;

    let (status, body) = app.get(&format!("/api/profile?token={token}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "customer");
}

#[tokio::test]
async fn repeated_token_parameter_still_authenticates() {
    let app = TestApp::new();
    let (id, token) = app.signed_in_user("alice", "secret123").await;

    let (status, body) = app
        .get(&format!("/api/profile?token={token}&token={token}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
}

#[tokio::test]
async fn profile_without_token_is_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "No token provided" }));
}

#[tokio::test]
async fn forged_token_is_forbidden() {
    let app = TestApp::new();
    let (id, _) = app.signed_in_user("alice", "secret123").await;
    let forged = JwtService::new("some-other-secret", Duration::days(7))
        .create_token(id)
        .unwrap();

    let (status, body) = app.get("/api/profile", Some(&forged)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Failed to authenticate token" }));
}

#[tokio::test]
async fn expired_token_is_forbidden() {
    let app = TestApp::new();
    let (id, _) = app.signed_in_user("alice", "secret123").await;

    // Correct secret, but issued long enough ago to be past the 7 day lifetime
    let expired = app
        .state
        .jwt_service
        .create_token_at(id, Utc::now() - Duration::days(8))
        .unwrap();

    let (status, body) = app.get("/api/profile", Some(&expired)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "Failed to authenticate token" }));
}
