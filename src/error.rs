//! Unified error types for the service.

use thiserror::Error;

/// Fatal startup error. Never recovered; `main` logs it and exits non-zero.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Datastore could not be reached.
    #[error("cannot connect to database: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Metrics exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// Listener bind or serve failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("{0} is not found in the environment")]
    Missing(String),

    /// A variable is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl From<envy::Error> for ConfigError {
    fn from(err: envy::Error) -> Self {
        match err {
            envy::Error::MissingValue(field) => Self::Missing(field.to_uppercase()),
            envy::Error::Custom(reason) => Self::Invalid(reason),
        }
    }
}

/// Failures surfaced by a [`UserStore`](crate::store::UserStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The write violated a uniqueness or integrity constraint.
    #[error("constraint violation: {message}")]
    ConstraintViolation {
        /// Human-readable description.
        message: String,
    },

    /// The datastore could not be reached.
    #[error("datastore connection failed: {message}")]
    Connection {
        /// Underlying driver message.
        message: String,
    },

    /// Any other datastore failure.
    #[error("datastore query failed: {message}")]
    Query {
        /// Underlying driver message.
        message: String,
    },
}

impl PersistenceError {
    /// Helper for constraint violations.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
        }
    }

    /// Helper for connectivity failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::Connection { .. } => "connection",
            Self::Query { .. } => "query",
        }
    }
}

/// Per-request error. Converted to a JSON error response at the handler
/// boundary; see `api::response`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body could not be decoded.
    #[error("Error parsing JSON: {0}")]
    Decode(String),

    /// Request body decoded but a field is unacceptable.
    #[error("{0}")]
    Validation(String),

    /// Datastore rejected or failed the write.
    #[error("Couldn't create user: {0}")]
    Persistence(#[from] PersistenceError),

    /// Generic server-side failure.
    #[error("{0}")]
    Internal(String),
}

/// Convenient Result type alias for startup code.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envy_missing_value_maps_to_upper_case_name() {
        let err: ConfigError = envy::from_iter::<_, crate::Config>(Vec::new())
            .unwrap_err()
            .into();

        assert!(matches!(err, ConfigError::Missing(ref name) if name == "PORT" || name == "DB_URL"));
    }

    #[test]
    fn persistence_kind_labels() {
        assert_eq!(PersistenceError::constraint("dup").kind(), "constraint_violation");
        assert_eq!(PersistenceError::connection("down").kind(), "connection");
        assert_eq!(PersistenceError::query("bad").kind(), "query");
    }

    #[test]
    fn api_error_display_includes_message() {
        let err = ApiError::from(PersistenceError::constraint("name already taken"));
        assert_eq!(
            err.to_string(),
            "Couldn't create user: constraint violation: name already taken"
        );
    }
}
