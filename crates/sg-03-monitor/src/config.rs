//! Monitor configuration.

use std::time::Duration;

/// Default wait between samples.
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Wait after each publish before sampling again.
    pub sample_period: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_period: DEFAULT_SAMPLE_PERIOD,
        }
    }
}
