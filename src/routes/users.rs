//! Routes that act on the authenticated caller

use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::models::{AuthRole, AuthUser};
use crate::database::models::User;
use crate::error::AppError;
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

/// `GET /api/profile`: the caller's own account. Token required.
pub async fn profile(
    State(app_state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    // A valid token for a deleted user is treated like any other unknown identity.
    let user = app_state
        .store
        .find_by_id(auth_user.id)
        .await
        .map_err(AppError::Internal)?
        .ok_or(AppError::AccessDenied)?;

    Ok(Json(ProfileResponse {
        id: user.id,
        username: user.username,
        role: user.role,
    }))
}

/// `GET /api/admin/users`: every account, without password hashes. Admin only.
pub async fn list_users(
    State(app_state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Extension(AuthRole(role)): Extension<AuthRole>,
) -> Result<Json<UserListResponse>, AppError> {
    tracing::info!("User listing requested by {} ({})", auth_user.id, role);

    let users = app_state
        .store
        .list_users()
        .await
        .map_err(AppError::Internal)?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserSummary::from).collect(),
    }))
}
