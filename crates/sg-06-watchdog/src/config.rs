//! Watchdog configuration.

use std::time::Duration;

/// Default liveness window.
pub const DEFAULT_WATCHDOG_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// A registered worker that has not pulsed for this long is overdue.
    pub timeout: Duration,
    /// Fire the reset handler on the first overdue worker.
    pub fatal_on_timeout: bool,
    /// How often the monitor task checks.
    pub check_interval: Duration,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WATCHDOG_TIMEOUT,
            fatal_on_timeout: true,
            check_interval: Duration::from_secs(1),
        }
    }
}
