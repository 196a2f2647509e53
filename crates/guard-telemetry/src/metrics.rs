//! Prometheus metrics for SSID Guard components.
//!
//! All metrics follow the naming convention: `sg_<component>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., alerts_raised_total)
//! - **CounterVec**: Counter split by a label (e.g., pulses per worker)

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // WHITELIST METRICS (SG-01)
    // =========================================================================

    /// Whitelist lock waits that hit the bound
    pub static ref WHITELIST_LOCK_TIMEOUTS: CounterVec = CounterVec::new(
        Opts::new("sg_whitelist_lock_timeouts_total", "Whitelist lock acquisitions that timed out"),
        &["operation"]  // operation: classify/rebuild/snapshot
    ).expect("metric creation failed");

    /// Completed whitelist rebuilds
    pub static ref WHITELIST_REBUILDS: Counter = Counter::new(
        "sg_whitelist_rebuilds_total",
        "Total number of completed whitelist rebuilds"
    ).expect("metric creation failed");

    // =========================================================================
    // CONNECTION METRICS (SG-02)
    // =========================================================================

    /// Disconnect-then-reconnect cycles issued
    pub static ref RECONNECT_ATTEMPTS: Counter = Counter::new(
        "sg_connection_reconnect_attempts_total",
        "Total reconnect cycles issued by the connection supervisor"
    ).expect("metric creation failed");

    // =========================================================================
    // MONITOR METRICS (SG-03)
    // =========================================================================

    /// Classifications produced, by verdict
    pub static ref CLASSIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("sg_monitor_classifications_total", "Classifications produced by the monitor"),
        &["verdict"]  // verdict: authorized/unauthorized/disconnected
    ).expect("metric creation failed");

    /// Classifications dropped before reaching the consumer
    pub static ref CLASSIFICATIONS_DROPPED: Counter = Counter::new(
        "sg_monitor_classifications_dropped_total",
        "Classifications dropped because the channel was full or closed"
    ).expect("metric creation failed");

    // =========================================================================
    // ALERT METRICS (SG-04)
    // =========================================================================

    /// Alerts raised for unauthorized networks
    pub static ref ALERTS_RAISED: Counter = Counter::new(
        "sg_alerting_alerts_raised_total",
        "Total alerts raised for unauthorized networks"
    ).expect("metric creation failed");

    /// Authorized observations logged as OK
    pub static ref AUTHORIZED_OBSERVATIONS: Counter = Counter::new(
        "sg_alerting_authorized_total",
        "Total classifications logged as authorized"
    ).expect("metric creation failed");

    // =========================================================================
    // POLICY METRICS (SG-05)
    // =========================================================================

    /// Policy mode changes applied
    pub static ref POLICY_TOGGLES: Counter = Counter::new(
        "sg_policy_toggles_total",
        "Total policy mode changes applied"
    ).expect("metric creation failed");

    /// Policy changes abandoned after every rebuild attempt failed
    pub static ref POLICY_REBUILD_FAILURES: Counter = Counter::new(
        "sg_policy_rebuild_failures_total",
        "Policy changes abandoned because the whitelist stayed locked"
    ).expect("metric creation failed");

    // =========================================================================
    // WATCHDOG METRICS (SG-06)
    // =========================================================================

    /// Liveness pulses by worker
    pub static ref WATCHDOG_PULSES: CounterVec = CounterVec::new(
        Opts::new("sg_watchdog_pulses_total", "Liveness pulses received"),
        &["worker"]
    ).expect("metric creation failed");

    /// Fatal watchdog trips
    pub static ref WATCHDOG_TRIPS: Counter = Counter::new(
        "sg_watchdog_trips_total",
        "Times a worker missed its liveness window"
    ).expect("metric creation failed");
}

/// Handle for the metrics registry
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Whitelist
        Box::new(WHITELIST_LOCK_TIMEOUTS.clone()),
        Box::new(WHITELIST_REBUILDS.clone()),
        // Connection
        Box::new(RECONNECT_ATTEMPTS.clone()),
        // Monitor
        Box::new(CLASSIFICATIONS.clone()),
        Box::new(CLASSIFICATIONS_DROPPED.clone()),
        // Alerting
        Box::new(ALERTS_RAISED.clone()),
        Box::new(AUTHORIZED_OBSERVATIONS.clone()),
        // Policy
        Box::new(POLICY_TOGGLES.clone()),
        Box::new(POLICY_REBUILD_FAILURES.clone()),
        // Watchdog
        Box::new(WATCHDOG_PULSES.clone()),
        Box::new(WATCHDOG_TRIPS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        // May fail if already registered, which is fine
        let _ = register_metrics();
    }

    #[test]
    fn test_counter_increment() {
        ALERTS_RAISED.inc();
        assert!(ALERTS_RAISED.get() >= 1.0);
    }

    #[test]
    fn test_labelled_counter() {
        WATCHDOG_PULSES.with_label_values(&["sg-03-monitor"]).inc();
        assert!(WATCHDOG_PULSES.with_label_values(&["sg-03-monitor"]).get() >= 1.0);
    }

    #[test]
    fn test_encode_contains_registered_names() {
        let _ = register_metrics();
        POLICY_TOGGLES.inc();
        let text = encode_metrics().expect("encode");
        assert!(text.contains("sg_policy_toggles_total"));
    }
}
