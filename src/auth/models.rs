//! Authentication Models
//!
//! Request/response payloads and the identity attached to authenticated requests.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity attached to the request by the token middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Role attached to the request by the role gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRole(pub String);

/// Register and login payload
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Token response after successful login
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
