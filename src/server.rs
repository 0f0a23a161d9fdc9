//! # Server Module
//!
//! HTTP server setup and route configuration.

use anyhow::{Context, Result};
use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::get,
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::auth::{CredentialService, JwtService, PasswordService, RoleGate, require_token, role_gate};
use crate::config::{AuthConfig, Config, ServerConfig};
use crate::database::{DatabaseConnection, UserStore, migrations, models::ADMIN_ROLE};
use crate::error::{expose_error_detail, panic_response, timeout_response};
use crate::routes::{auth, health, not_found, users};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub jwt_service: Arc<JwtService>,
    pub store: Arc<dyn UserStore>,
    pub started_at: Instant,
}

impl AppState {
    /// Wire the auth services around an already-connected store
    pub fn new(store: Arc<dyn UserStore>, auth: &AuthConfig) -> Result<Self> {
        let jwt_service = Arc::new(JwtService::new(&auth.jwt_secret, auth.jwt_expiration));
        let passwords = PasswordService::new(auth.hash_cost)?;
        let credentials = Arc::new(CredentialService::new(
            store.clone(),
            jwt_service.clone(),
            passwords,
        ));

        Ok(Self {
            credentials,
            jwt_service,
            store,
            started_at: Instant::now(),
        })
    }
}

/// Build the full router: public health checks, credential routes, token-guarded
/// and role-guarded routes, plus the cross-cutting layers.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let development = server.development;

    // Token required
    let authenticated_routes = Router::new()
        .route("/api/profile", get(users::profile))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            require_token,
        ));

    // Token and admin role required; the last route_layer runs first
    let admin_gate = RoleGate::new(state.store.clone(), [ADMIN_ROLE]);
    let admin_routes = Router::new()
        .route("/api/admin/users", get(users::list_users))
        .route_layer(middleware::from_fn_with_state(admin_gate, role_gate))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            require_token,
        ));

    Router::new()
        .route("/", get(health::root))
        .route("/api/test", get(health::api_test))
        .route("/health", get(health::health))
        .merge(auth::create_auth_routes())
        .nest("/api/auth", auth::create_auth_routes())
        .merge(authenticated_routes)
        .merge(admin_routes)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(
                    move |panic: Box<dyn Any + Send + 'static>| panic_response(development, panic),
                ))
                .layer(middleware::from_fn(timeout_response))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    server.request_timeout,
                ))
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn_with_state(development, expose_error_detail)),
        )
        .with_state(state)
}

/// Connects to the database, applies migrations and serves until Ctrl+C.
pub async fn start(config: Config) -> Result<()> {
    let db = DatabaseConnection::new(config.database.clone()).await?;
    migrations::run_migrations(db.pool()).await?;

    let store: Arc<dyn UserStore> = Arc::new(db);
    let state = AppState::new(store, &config.auth)?;
    let app = build_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("Server is running at http://{}", addr);
    tracing::info!("API Test: http://{}/api/test", addr);
    tracing::info!("Health Check: http://{}/health", addr);
    tracing::info!(
        "Environment: {}",
        if config.server.development { "development" } else { "production" }
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
