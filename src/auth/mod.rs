//! # Authentication Module
//!
//! Password hashing, JWT issuance and validation, the credential service
//! behind register/login, and the middleware that guards routes by token
//! and by stored role.

pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;

pub use jwt::JwtService;
pub use middleware::{RoleGate, require_token, role_gate};
pub use password::PasswordService;
pub use service::CredentialService;
