//! # Guard Telemetry
//!
//! Structured logging and Prometheus counters for SSID Guard.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guard_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     guard_telemetry::log_event!(info, "sg-runtime", "Guard starting");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SG_SERVICE_NAME` | `ssid-guard` | Service name in the startup banner |
//! | `SG_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `SG_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `SG_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `SG_METRICS_DUMP` | `true` | Log the metrics text dump on exit |

mod config;
pub mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ALERTS_RAISED, AUTHORIZED_OBSERVATIONS,
    CLASSIFICATIONS, CLASSIFICATIONS_DROPPED, POLICY_REBUILD_FAILURES, POLICY_TOGGLES,
    RECONNECT_ATTEMPTS, WATCHDOG_PULSES, WATCHDOG_TRIPS, WHITELIST_LOCK_TIMEOUTS,
    WHITELIST_REBUILDS,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early events can already be counted
    let metrics_handle = register_metrics()?;

    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
        dump_on_drop: config.dump_metrics_on_exit,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
    dump_on_drop: bool,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if !self.dump_on_drop {
            return;
        }
        match encode_metrics() {
            Ok(text) => tracing::debug!(metrics = %text, "Final metrics snapshot"),
            Err(e) => tracing::warn!(error = %e, "Failed to encode metrics"),
        }
    }
}
