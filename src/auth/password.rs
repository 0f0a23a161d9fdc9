//! Password hashing
//!
//! Argon2id with a per-password random salt. Hashing is CPU-bound, so both
//! operations run on tokio's blocking pool.

use std::ops::RangeInclusive;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Accepted range for the argon2 time cost
pub const HASH_COST_RANGE: RangeInclusive<u32> = 1..=64;

#[derive(Debug, Clone)]
pub struct PasswordService {
    params: Params,
    /// Hash of a throwaway password with the live parameters; logins for
    /// unknown users verify against it so both failure paths cost the same.
    decoy_hash: Arc<str>,
}

impl PasswordService {
    /// `cost` is the argon2 time cost (number of passes over memory).
    ///
    /// Hashes the decoy once, synchronously; call before serving.
    pub fn new(cost: u32) -> Result<Self> {
        if !HASH_COST_RANGE.contains(&cost) {
            bail!(
                "Password hash cost {cost} outside {}..={}",
                HASH_COST_RANGE.start(),
                HASH_COST_RANGE.end()
            );
        }
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| anyhow!("Invalid password hash cost {cost}: {e}"))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone());
        let salt = SaltString::generate(&mut OsRng);
        let decoy_hash = argon2
            .hash_password(b"decoy-password-never-issued", &salt)
            .map_err(|e| anyhow!("Failed to hash decoy password: {e}"))?
            .to_string();

        Ok(Self {
            params,
            decoy_hash: decoy_hash.into(),
        })
    }

    /// PHC string the decoy verification runs against
    pub fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }

    /// Burn one verification's worth of work for a login with no matching
    /// user. The outcome is discarded.
    pub async fn verify_decoy(&self, password: String) {
        if let Err(e) = self.verify(password, self.decoy_hash.to_string()).await {
            tracing::warn!("Decoy password verification failed: {:#}", e);
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password into a PHC string
    pub async fn hash(&self, password: String) -> Result<String> {
        let argon2 = self.argon2();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow!("Failed to hash password: {e}"))
        })
        .await
        .context("Password hashing task failed")?
    }

    /// Check a password against a stored PHC string.
    ///
    /// A mismatch is `Ok(false)`; a malformed stored hash is an error.
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool> {
        let argon2 = self.argon2();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored_hash)
                .map_err(|e| anyhow!("Stored password hash is malformed: {e}"))?;
            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow!("Failed to verify password: {e}")),
            }
        })
        .await
        .context("Password verification task failed")?
    }
}
