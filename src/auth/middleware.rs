//! Authentication Middleware
//!
//! Axum middleware for JWT token validation and role gating.

use axum::{
    extract::{Query, Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{
    jwt::JwtService,
    models::{AuthRole, AuthUser},
};
use crate::database::UserStore;
use crate::error::AppError;

/// Pull the bearer token from the `Authorization` header, falling back to
/// the first non-empty `token` query parameter.
pub fn extract_token(req: &Request) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .or_else(|| {
            // Pairs rather than a struct so a repeated `token` key still parses
            let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri()).ok()?;
            pairs
                .into_iter()
                .find(|(key, value)| key == "token" && !value.is_empty())
                .map(|(_, value)| value)
        })
}

/// Validates the bearer token and injects [`AuthUser`] for downstream handlers
pub async fn require_token(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(&req) else {
        tracing::warn!("Missing token on {} {}", req.method(), req.uri().path());
        return Err(AppError::MissingToken);
    };

    let claims = jwt_service.decode_claims(&token).map_err(|e| {
        tracing::warn!("JWT validation failed: {:#}", e);
        AppError::InvalidToken
    })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });
    Ok(next.run(req).await)
}

/// State for [`role_gate`]: the store to ask and the roles let through
#[derive(Clone)]
pub struct RoleGate {
    store: Arc<dyn UserStore>,
    allowed: Arc<[String]>,
}

impl RoleGate {
    pub fn new<I, S>(store: Arc<dyn UserStore>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            store,
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permits(&self, role: &str) -> bool {
        self.allowed.iter().any(|allowed| allowed == role)
    }
}

/// Looks up the caller's role on every request and rejects roles outside
/// the gate's set. Must be layered inside [`require_token`].
pub async fn role_gate(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = *req
        .extensions()
        .get::<AuthUser>()
        .ok_or(AppError::MissingToken)?;

    let role = gate
        .store
        .find_role(user.id)
        .await
        .map_err(AppError::Storage)?;

    match role {
        Some(role) if gate.permits(&role) => {
            req.extensions_mut().insert(AuthRole(role));
            Ok(next.run(req).await)
        }
        Some(role) => {
            tracing::warn!("Access denied for user {} with role {}", user.id, role);
            Err(AppError::AccessDenied)
        }
        None => {
            tracing::warn!("Access denied, no record for user {}", user.id);
            Err(AppError::AccessDenied)
        }
    }
}
