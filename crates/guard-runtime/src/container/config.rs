//! # Guard Configuration
//!
//! Unified configuration for every component and the control loop.
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SG_SSID` | `connection.credentials.ssid` |
//! | `SG_PASSWORD` | `connection.credentials.password` |
//! | `SG_INITIAL_MODE` | `policy.initial_mode` (`permissive`/`strict`) |
//! | `SG_WATCHDOG_SECS` | `watchdog.timeout` |
//! | `SG_SAMPLE_MS` | `monitor.sample_period` |
//!
//! Overrides that fail to parse are logged and ignored.

use std::time::Duration;

use sg_01_whitelist::WhitelistConfig;
use sg_02_connection::SupervisorConfig;
use sg_03_monitor::MonitorConfig;
use sg_04_alerting::AlertConfig;
use sg_05_policy::PolicyConfig;
use sg_06_watchdog::WatchdogConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{PolicyMode, WorkerId};
use thiserror::Error;
use tracing::{info, warn};

/// Complete guard configuration.
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Whitelist content and lock bound.
    pub whitelist: WhitelistConfig,
    /// Connection supervisor timing and credentials.
    pub connection: SupervisorConfig,
    /// Network monitor timing.
    pub monitor: MonitorConfig,
    /// Alert handler timing.
    pub alerting: AlertConfig,
    /// Policy input sampling and rebuild retries.
    pub policy: PolicyConfig,
    /// Liveness window.
    pub watchdog: WatchdogConfig,
    /// Unread classifications held by the channel.
    pub channel_capacity: usize,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            whitelist: WhitelistConfig::default(),
            connection: SupervisorConfig::default(),
            monitor: MonitorConfig::default(),
            alerting: AlertConfig::default(),
            policy: PolicyConfig::default(),
            watchdog: WatchdogConfig::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Channel capacity must be at least 1")]
    ZeroChannelCapacity,

    #[error("Whitelist capacity must be at least 1")]
    ZeroWhitelistCapacity,

    #[error("Default whitelist has {defaults} identifiers but capacity is {capacity}")]
    DefaultsExceedCapacity { defaults: usize, capacity: usize },

    #[error("Watchdog timeout {timeout:?} does not cover {worker} iteration of {iteration:?}")]
    WatchdogTooShort {
        worker: WorkerId,
        iteration: Duration,
        timeout: Duration,
    },
}

impl GuardConfig {
    /// Longest gap between two pulses of `worker`.
    #[must_use]
    pub fn longest_iteration(&self, worker: WorkerId) -> Duration {
        match worker {
            WorkerId::ConnectionSupervisor => self.connection.longest_iteration(),
            WorkerId::NetworkMonitor => self.monitor.sample_period + self.whitelist.lock_wait,
            WorkerId::AlertHandler => self.alerting.longest_iteration(),
        }
    }

    /// Reject configurations the guard cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        if self.whitelist.capacity == 0 {
            return Err(ConfigError::ZeroWhitelistCapacity);
        }
        if self.whitelist.defaults.len() > self.whitelist.capacity {
            return Err(ConfigError::DefaultsExceedCapacity {
                defaults: self.whitelist.defaults.len(),
                capacity: self.whitelist.capacity,
            });
        }

        for worker in WorkerId::all() {
            let iteration = self.longest_iteration(worker);
            if iteration >= self.watchdog.timeout {
                return Err(ConfigError::WatchdogTooShort {
                    worker,
                    iteration,
                    timeout: self.watchdog.timeout,
                });
            }
        }
        Ok(())
    }

    /// Apply `SG_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ssid) = lookup("SG_SSID") {
            info!(ssid = %ssid, "Loaded SSID from environment");
            self.connection.credentials.ssid = ssid;
        }
        if let Some(password) = lookup("SG_PASSWORD") {
            self.connection.credentials.password = password;
        }

        if let Some(raw) = lookup("SG_INITIAL_MODE") {
            match raw.parse::<PolicyMode>() {
                Ok(mode) => self.policy.initial_mode = mode,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring SG_INITIAL_MODE"),
            }
        }

        if let Some(raw) = lookup("SG_WATCHDOG_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.watchdog.timeout = Duration::from_secs(secs),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring SG_WATCHDOG_SECS"),
            }
        }

        if let Some(raw) = lookup("SG_SAMPLE_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.monitor.sample_period = Duration::from_millis(ms),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring SG_SAMPLE_MS"),
            }
        }
    }
}
