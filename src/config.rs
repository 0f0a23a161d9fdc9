//! Configuration module for environment variables and application settings

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Duration;

use crate::auth::password::HASH_COST_RANGE;
use crate::database::DatabaseConfig;

/// Application configuration loaded from environment variables.
///
/// Built once in `main` and handed to the server; nothing reads it
/// through a global.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Server configuration
    pub server: ServerConfig,

    /// Token and password hashing configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single request, including database and hashing work
    pub request_timeout: StdDuration,
    /// Expose internal error detail in 500 responses
    pub development: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration: Duration,
    /// Password hash cost factor (argon2 time cost)
    pub hash_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow!("JWT_SECRET environment variable is required"))?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expiration = parse_duration(&var_or("JWT_EXPIRE", "7d"))
            .context("Invalid JWT_EXPIRE")?;

        let hash_cost = check_hash_cost(parse_var("HASH_COST", 10)?)?;

        Ok(Self {
            database: DatabaseConfig::from_env()?,

            server: ServerConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var("PORT", 5000)?,
                request_timeout: StdDuration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 30)?),
                development: var_or("APP_ENV", "production").eq_ignore_ascii_case("development"),
            },

            auth: AuthConfig {
                jwt_secret,
                jwt_expiration,
                hash_cost,
            },
        })
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Reject hash costs that would stall every register and login.
pub fn check_hash_cost(cost: u32) -> Result<u32> {
    if !HASH_COST_RANGE.contains(&cost) {
        bail!(
            "HASH_COST must be between {} and {}, got {cost}",
            HASH_COST_RANGE.start(),
            HASH_COST_RANGE.end()
        );
    }
    Ok(cost)
}

/// Read an environment variable, falling back to `default` when unset.
pub(crate) fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable; unset means `default`, garbage is an error.
pub(crate) fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid value for {key} ({raw:?}): {e}")),
        Err(_) => Ok(default),
    }
}

/// Parse a token lifetime such as `7d`, `12h`, `30m`, `45s`, `2w` or a bare
/// number of seconds.
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty duration");
    }

    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    let amount: i64 = digits
        .parse()
        .with_context(|| format!("duration {raw:?} must start with a number"))?;

    let duration = match unit.trim() {
        "" | "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        other => bail!("unknown duration unit {other:?} in {raw:?}"),
    }
    .ok_or_else(|| anyhow!("duration {raw:?} is out of range"))?;

    if duration <= Duration::zero() {
        bail!("duration {raw:?} must be positive");
    }
    Ok(duration)
}
