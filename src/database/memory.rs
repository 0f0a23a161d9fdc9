//! In-memory user store
//!
//! Mirrors the Postgres store closely enough for tests, including the
//! unique index on `username`. Can be switched into a failing mode to
//! exercise storage-error paths, or slowed down to exercise timeouts.

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{NewUser, User};
use crate::database::store::UserStore;

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
    failing: AtomicBool,
    /// Milliseconds every call waits before answering
    delay_ms: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every subsequent call wait `delay` before answering
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Overwrite the role of an existing user
    pub async fn set_role(&self, id: Uuid, role: &str) -> bool {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role.to_string();
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn check(&self) -> Result<()> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check().await?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        self.check().await?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<()> {
        self.check().await?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            bail!("duplicate key value violates unique constraint \"users_username_key\"");
        }
        users.push(User {
            id: user.id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role.clone(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn find_role(&self, id: Uuid) -> Result<Option<String>> {
        self.check().await?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).map(|u| u.role.clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check().await?;
        Ok(self.users.read().await.clone())
    }

    async fn health_check(&self) -> Result<()> {
        self.check().await
    }
}
