//! Persisted record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    /// Identifier assigned on insert.
    pub id: Uuid,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Last modification time. Equal to `created_at` for new rows.
    pub updated_at: DateTime<Utc>,
    /// Display name supplied by the caller.
    pub name: String,
}

impl User {
    /// Build a fresh record with a new identifier and matching timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_has_matching_timestamps() {
        let user = User::new("alice");
        assert_eq!(user.created_at, user.updated_at);
        assert_eq!(user.name, "alice");
        assert!(!user.id.is_nil());
    }

    #[test]
    fn serializes_snake_case_fields() {
        let user = User::new("bob");
        let value = serde_json::to_value(&user).unwrap();

        for field in ["id", "created_at", "updated_at", "name"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }
}
