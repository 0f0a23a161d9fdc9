//! Credential Service
//!
//! Registration and login on top of the user store, the password hasher and
//! the JWT service.

use std::sync::Arc;

use crate::auth::{jwt::JwtService, password::PasswordService};
use crate::database::{UserStore, models::NewUser};
use crate::error::AppError;

#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    jwt_service: Arc<JwtService>,
    passwords: PasswordService,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt_service: Arc<JwtService>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            store,
            jwt_service,
            passwords,
        }
    }

    /// Create an account.
    ///
    /// The existence check and the insert are separate statements, so two
    /// concurrent registrations of one name can both pass the check; the
    /// loser fails on the unique index and surfaces as an internal error.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AppError> {
        let existing = self
            .store
            .find_by_username(username)
            .await
            .map_err(AppError::Internal)?;
        if existing.is_some() {
            tracing::info!("Registration rejected, username taken: {}", username);
            return Err(AppError::DuplicateUser);
        }

        let password_hash = self
            .passwords
            .hash(password.to_string())
            .await
            .map_err(AppError::Internal)?;

        let user = NewUser::new(username, password_hash);
        self.store
            .insert_user(&user)
            .await
            .map_err(AppError::Internal)?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(())
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown username and wrong password both fail with
    /// [`AppError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let Some(user) = self
            .store
            .find_by_username(username)
            .await
            .map_err(AppError::Internal)?
        else {
            // Pay the same hashing cost as a wrong password would.
            self.passwords.verify_decoy(password.to_string()).await;
            return Err(AppError::InvalidCredentials);
        };

        let matches = self
            .passwords
            .verify(password.to_string(), user.password_hash)
            .await
            .map_err(AppError::Internal)?;
        if !matches {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .jwt_service
            .create_token(user.id)
            .map_err(AppError::Internal)?;

        tracing::info!("User {} logged in", user.id);
        Ok(token)
    }

    /// Logout is client-side only; nothing is revoked here.
    pub fn logout(&self) {}
}
