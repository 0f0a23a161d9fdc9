//! # Shop Auth Server
//!
//! HTTP backend for a shopping-site prototype: registration, login and
//! logout, JWT bearer authentication and a role gate backed by PostgreSQL.
//!
//! ## Architecture
//! - `server`: application state, router and serve loop
//! - `config`: environment variable configuration
//! - `auth`: password hashing, JWT service, credential service, middleware
//! - `database`: connection pool, user model, storage seam, migrations
//! - `routes`: HTTP handlers
//! - `error`: the error taxonomy and its HTTP mapping

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod server;
