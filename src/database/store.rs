//! User storage seam
//!
//! The handful of queries the auth flow issues. Postgres implements it in
//! `connection.rs`; `memory.rs` provides an in-process implementation used
//! by tests.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::database::models::{NewUser, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Insert a freshly registered user
    async fn insert_user(&self, user: &NewUser) -> Result<()>;

    /// Current role of a user, `None` if the user does not exist
    async fn find_role(&self, id: Uuid) -> Result<Option<String>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Round-trip to the backing store
    async fn health_check(&self) -> Result<()>;
}
