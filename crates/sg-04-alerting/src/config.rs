//! Alert handler configuration.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Bound on each receive attempt.
    pub receive_timeout: Duration,
    /// On/off cycles per alert.
    pub blink_cycles: u32,
    /// Duration of each on and each off phase.
    pub blink_phase: Duration,
}

impl AlertConfig {
    /// Total time one alert keeps the handler busy.
    #[must_use]
    pub fn blink_duration(&self) -> Duration {
        self.blink_phase * 2 * self.blink_cycles
    }

    /// Longest gap between pulses: a message arriving at the end of the
    /// receive window, followed by a full blink.
    #[must_use]
    pub fn longest_iteration(&self) -> Duration {
        self.receive_timeout + self.blink_duration()
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(2),
            blink_cycles: 3,
            blink_phase: Duration::from_millis(150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_blink_is_900ms() {
        assert_eq!(AlertConfig::default().blink_duration(), Duration::from_millis(900));
    }

    #[test]
    fn test_longest_iteration_includes_blink() {
        assert_eq!(
            AlertConfig::default().longest_iteration(),
            Duration::from_millis(2900)
        );
    }
}
