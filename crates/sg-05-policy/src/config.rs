//! Policy controller configuration.

use std::time::Duration;

use shared_types::PolicyMode;

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Interval at which the control loop samples the input.
    pub poll_interval: Duration,
    /// Rebuild attempts per mode change before giving up.
    pub rebuild_attempts: u32,
    /// Mode applied at startup.
    pub initial_mode: PolicyMode,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(200),
            rebuild_attempts: 3,
            initial_mode: PolicyMode::Permissive,
        }
    }
}
