//! Versioned HTTP API for registering users.
//!
//! Three routes live under `/v1`:
//!
//! ```text
//! GET  /v1/healthz   liveness probe
//! GET  /v1/err       always answers 500
//! POST /v1/users     {"name": "alice"} -> 201 + user record
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: User datastore port with PostgreSQL and in-memory adapters
//! - [`api`]: Router, handlers, and CORS policy
//! - [`server`]: Listener binding and graceful shutdown
//! - [`metrics`]: Prometheus metrics

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{ApiError, ConfigError, PersistenceError, Result, ServiceError};
