//! Supervisor configuration.

use std::fmt;
use std::time::Duration;

/// SSID the guard associates with at startup.
pub const DEFAULT_SSID: &str = "Wokwi-GUEST";

/// Network credentials used for the initial association.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: String,
    pub password: String,
}

impl Credentials {
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
        }
    }

    /// Open network (no password).
    pub fn open(ssid: impl Into<String>) -> Self {
        Self::new(ssid, String::new())
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::open(DEFAULT_SSID)
    }
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// Timing and credentials for the supervisor loop.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Initial association target.
    pub credentials: Credentials,
    /// Wait after a reconnect request before checking again.
    pub retry_interval: Duration,
    /// Wait between checks while connected.
    pub idle_interval: Duration,
    /// Pause between the disconnect and reconnect requests.
    pub settle_delay: Duration,
}

impl SupervisorConfig {
    /// Longest single loop iteration; must stay inside the watchdog window.
    #[must_use]
    pub fn longest_iteration(&self) -> Duration {
        (self.settle_delay + self.retry_interval).max(self.idle_interval)
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            retry_interval: Duration::from_secs(2),
            idle_interval: Duration::from_secs(3),
            settle_delay: Duration::from_millis(200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("CorpNet-5G", "hunter2");
        let printed = format!("{creds:?}");
        assert!(printed.contains("CorpNet-5G"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_default_targets_open_network() {
        let creds = Credentials::default();
        assert_eq!(creds.ssid, DEFAULT_SSID);
        assert!(creds.password.is_empty());
    }

    #[test]
    fn test_longest_iteration() {
        let config = SupervisorConfig::default();
        assert_eq!(config.longest_iteration(), Duration::from_secs(3));
    }
}
