//! Service configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Service configuration loaded from environment variables.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// TCP port the HTTP server binds (`PORT`).
    pub port: u16,

    // === Datastore Configuration ===
    /// PostgreSQL connection string (`DB_URL`).
    pub db_url: String,

    /// Upper bound on pooled datastore connections.
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection before failing a request.
    #[serde(default = "default_acquire_timeout")]
    pub db_acquire_timeout_secs: u64,

    // === Observability ===
    /// Port for the Prometheus exporter. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Blank values count as unset, so `PORT=` is reported as missing.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars.into_iter().filter(|(_, value)| !value.trim().is_empty());
        let config: Self = envy::from_iter(vars)?;
        config.validate()?;
        Ok(config)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        if self.db_url.trim().is_empty() {
            return Err(ConfigError::Missing("DB_URL".to_string()));
        }

        if self.db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Pool acquire timeout as a [`Duration`].
    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    /// Connection string with any password masked, safe to log.
    pub fn redacted_db_url(&self) -> String {
        let Some((scheme, rest)) = self.db_url.split_once("://") else {
            return "***".to_string();
        };
        match rest.rsplit_once('@') {
            Some((userinfo, host)) => {
                let user = userinfo.split(':').next().unwrap_or_default();
                format!("{scheme}://{user}:***@{host}")
            }
            None => self.db_url.clone(),
        }
    }
}
