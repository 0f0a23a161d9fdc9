//! Auth routes for registration, login, and logout

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::auth::models::{Credentials, MessageResponse, TokenResponse};
use crate::error::AppError;
use crate::server::AppState;

fn credentials(payload: Result<Json<Credentials>, JsonRejection>) -> Result<Credentials, AppError> {
    payload
        .map(|Json(credentials)| credentials)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Credentials { username, password } = credentials(payload)?;

    app_state.credentials.register(&username, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Credentials { username, password } = credentials(payload)?;

    let token = app_state.credentials.login(&username, &password).await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn logout(State(app_state): State<AppState>) -> Json<MessageResponse> {
    app_state.credentials.logout();
    Json(MessageResponse {
        message: "Logged out successfully",
    })
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}
