//! # Shop Auth Server
//!
//! Authentication backend for the shop prototype, built on Axum, Tokio and
//! PostgreSQL.
//!
//! ## Environment Setup
//! Configuration comes from the environment or a `.env` file. `JWT_SECRET`
//! is required; everything else has a default:
//! ```bash
//! JWT_SECRET=change-me DB_HOST=localhost DB_NAME=joy_shop cargo run
//! ```
//!
//! The server listens on `0.0.0.0:5000` by default.
//!
//! ## Health Check
//! ```bash
//! curl http://localhost:5000/health
//! ```

use shop_auth_server::{config::Config, server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Initializes logging, loads configuration and runs the HTTP server until
/// Ctrl+C. Configuration or startup failures end the process with an error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("Build profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });

    let config = Config::from_env()?;
    server::start(config).await
}
