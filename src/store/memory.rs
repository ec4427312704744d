//! In-memory user store for tests and local runs.
//!
//! Enforces the same name uniqueness as the PostgreSQL schema so handler
//! behaviour matches across both adapters.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{User, UserStore};
use crate::error::PersistenceError;

/// [`UserStore`] backed by a concurrent map keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store holds no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a user by name.
    pub fn get(&self, name: &str) -> Option<User> {
        self.users.get(name).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, name: &str) -> Result<User, PersistenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::connection("store unavailable"));
        }

        match self.users.entry(name.to_string()) {
            Entry::Occupied(_) => Err(PersistenceError::constraint("name already taken")),
            Entry::Vacant(slot) => {
                let user = User::new(name);
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}
