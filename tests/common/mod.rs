#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use serde_json::{Value, json};
use shop_auth_server::config::{AuthConfig, ServerConfig};
use shop_auth_server::database::{MemoryUserStore, UserStore};
use shop_auth_server::server::{AppState, build_router};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(false, StdDuration::from_secs(30))
    }

    pub fn development() -> Self {
        Self::build(true, StdDuration::from_secs(30))
    }

    pub fn with_timeout(request_timeout: StdDuration) -> Self {
        Self::build(false, request_timeout)
    }

    fn build(development: bool, request_timeout: StdDuration) -> Self {
        let store = Arc::new(MemoryUserStore::new());
        let auth = AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            jwt_expiration: Duration::days(7),
            hash_cost: 1,
        };
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout,
            development,
        };
        let state = AppState::new(store.clone(), &auth).expect("test state");
        let router = build_router(state.clone(), &server);
        Self {
            router,
            store,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.post_json(
            "/register",
            json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.post_json("/login", json!({ "username": username, "password": password }))
            .await
    }

    /// Register and log in, returning the user id and a token
    pub async fn signed_in_user(&self, username: &str, password: &str) -> (Uuid, String) {
        let (status, _) = self.register(username, password).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login(username, password).await;
        assert_eq!(status, StatusCode::OK);
        let id = self
            .store
            .find_by_username(username)
            .await
            .unwrap()
            .expect("registered user")
            .id;
        (id, body["token"].as_str().expect("token").to_string())
    }
}
