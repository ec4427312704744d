//! Datastore port for user records.
//!
//! This module handles:
//! - The [`UserStore`] trait consumed by HTTP handlers
//! - A PostgreSQL adapter backed by a `sqlx` pool
//! - An in-memory adapter for tests and local runs

pub mod memory;
pub mod postgres;
pub mod types;

use async_trait::async_trait;

use crate::error::PersistenceError;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use types::User;

/// Storage operations the API needs.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user with a fresh identifier and return the stored row.
    async fn create_user(&self, name: &str) -> Result<User, PersistenceError>;
}
