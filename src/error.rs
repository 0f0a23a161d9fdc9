//! Application error type and its HTTP mapping.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::any::Any;

/// Failures a request can end in.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User already exists")]
    DuplicateUser,

    /// Unknown username and wrong password share this variant
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    #[error("Failed to authenticate token")]
    InvalidToken,

    #[error("Access denied")]
    AccessDenied,

    #[error("Invalid request body")]
    BadRequest(String),

    #[error("Database error")]
    Storage(#[source] anyhow::Error),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

/// Internal error text attached to a 500 response, surfaced only in
/// development mode by [`expose_error_detail`].
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateUser | AppError::InvalidCredentials | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken | AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "message": self.to_string() }));

        match &self {
            AppError::Storage(source) | AppError::Internal(source) => {
                tracing::error!("{}: {:#}", self, source);
                let mut response = (status, body).into_response();
                response.extensions_mut().insert(ErrorDetail {
                    message: self.to_string(),
                    detail: format!("{source:#}"),
                });
                response
            }
            AppError::BadRequest(reason) => {
                tracing::debug!("Rejected request body: {}", reason);
                (status, body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

/// Adds the `error` field to internal-error responses when running in
/// development mode. Outside development the response passes through untouched.
pub async fn expose_error_detail(
    State(development): State<bool>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    if !development {
        return response;
    }
    let Some(ErrorDetail { message, detail }) = response.extensions_mut().remove::<ErrorDetail>()
    else {
        return response;
    };
    let status = response.status();
    (status, Json(json!({ "message": message, "error": detail }))).into_response()
}

/// Gives the bare 408 from the timeout layer a JSON body. Must sit outside
/// `TimeoutLayer`.
pub async fn timeout_response(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request timed out: {} {}", method, path);
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(json!({ "message": "Request timeout" })),
    )
        .into_response()
}

/// Final catch-all: turns a handler panic into the generic 500 body.
pub fn panic_response(development: bool, panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!("Server error: {}", detail);

    let error = if development { Value::String(detail) } else { json!({}) };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error", "error": error })),
    )
        .into_response()
}
