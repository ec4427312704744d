//! Prometheus metrics for user registration.
//!
//! Metrics are recorded through the `metrics` facade and only exported when
//! an exporter is installed (see [`install_exporter`]).

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::{debug, info};

// === Metric Name Constants ===

/// Users created counter metric name.
pub const METRIC_USERS_CREATED: &str = "users_created_total";
/// Failed user creations counter metric name.
pub const METRIC_USER_CREATE_FAILED: &str = "user_create_failed_total";
/// Create-user datastore latency metric name.
pub const METRIC_USER_CREATE_LATENCY: &str = "user_create_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_USERS_CREATED, "Total number of users created");
    describe_counter!(
        METRIC_USER_CREATE_FAILED,
        "Total number of failed user creations, by failure kind"
    );
    describe_histogram!(
        METRIC_USER_CREATE_LATENCY,
        "Datastore latency of user creation in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn install_exporter(port: u16) -> Result<(), BuildError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

/// Increment users created counter.
pub fn inc_users_created() {
    counter!(METRIC_USERS_CREATED).increment(1);
}

/// Increment failed user creations counter.
pub fn inc_user_create_failed(kind: &'static str) {
    counter!(METRIC_USER_CREATE_FAILED, "kind" => kind).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for user creation.
pub fn timer_user_create() -> LatencyTimer {
    LatencyTimer::new(METRIC_USER_CREATE_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_user_create();
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
    }

    #[test]
    fn recording_without_exporter_is_a_no_op() {
        init_metrics();
        inc_users_created();
        inc_user_create_failed("query");
    }
}
