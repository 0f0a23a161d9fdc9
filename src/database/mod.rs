//! # Database Module
//!
//! PostgreSQL integration using tokio-postgres pooled by deadpool.
//! Includes connection management, the user model, the storage seam the
//! auth flow queries through, and migrations.

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod store;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use memory::MemoryUserStore;
pub use store::UserStore;
