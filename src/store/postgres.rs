//! PostgreSQL user store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use super::{User, UserStore};
use crate::config::Config;
use crate::error::PersistenceError;

/// Schema migrations embedded from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

const INSERT_USER: &str = "INSERT INTO users (id, created_at, updated_at, name) \
     VALUES ($1, $2, $3, $4) \
     RETURNING id, created_at, updated_at, name";

/// [`UserStore`] backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Open a pool and verify the datastore is reachable.
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        info!(
            "Connecting to database at {} (max {} connections)",
            config.redacted_db_url(),
            config.db_max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout())
            .connect(&config.db_url)
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }

    /// Underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, name: &str) -> Result<User, PersistenceError> {
        let user = User::new(name);

        let stored = sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(id = %stored.id, "Inserted user");
        Ok(stored)
    }
}

/// Classify a driver error into the persistence taxonomy.
fn map_sqlx_error(err: sqlx::Error) -> PersistenceError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PersistenceError::constraint("name already taken")
        }
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() || db.is_check_violation() =>
        {
            PersistenceError::constraint(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => PersistenceError::connection(err.to_string()),
        _ => PersistenceError::query(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_map_to_connection() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            PersistenceError::Connection { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            PersistenceError::Connection { .. }
        ));
    }

    #[test]
    fn other_failures_map_to_query() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            PersistenceError::Query { .. }
        ));
    }

    #[test]
    fn embedded_migrations_create_users_table() {
        let sql: String = MIGRATOR
            .iter()
            .map(|m| m.sql.to_string())
            .collect();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(sql.contains("UNIQUE"));
    }
}
