//! Pulse table and monitor task.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use guard_telemetry::{log_event, WATCHDOG_PULSES, WATCHDOG_TRIPS};
use parking_lot::{Mutex, RwLock};
use shared_types::{Heartbeat, WorkerId};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::WatchdogConfig;
use crate::reset::ResetHandler;
use crate::COMPONENT;

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchdogVerdict {
    /// Every registered worker is within its window.
    Healthy,
    /// Workers are overdue but no reset was issued.
    Overdue(Vec<WorkerId>),
    /// Workers are overdue and the reset handler was just fired.
    Tripped(Vec<WorkerId>),
}

/// Liveness supervisor shared by all workers.
pub struct Watchdog {
    config: RwLock<WatchdogConfig>,
    last_pulse: Mutex<HashMap<WorkerId, Instant>>,
    tripped: AtomicBool,
    reset: Arc<dyn ResetHandler>,
}

impl Watchdog {
    pub fn new(config: WatchdogConfig, reset: Arc<dyn ResetHandler>) -> Self {
        Self {
            config: RwLock::new(config),
            last_pulse: Mutex::new(HashMap::new()),
            tripped: AtomicBool::new(false),
            reset,
        }
    }

    /// Change the window and the fatal flag.
    pub fn configure(&self, timeout: Duration, fatal_on_timeout: bool) {
        let mut config = self.config.write();
        config.timeout = timeout;
        config.fatal_on_timeout = fatal_on_timeout;
        log_event!(
            info,
            COMPONENT,
            "Watchdog configured",
            timeout_ms = timeout.as_millis() as u64,
            fatal = fatal_on_timeout
        );
    }

    #[must_use]
    pub fn config(&self) -> WatchdogConfig {
        *self.config.read()
    }

    /// True once the reset handler has fired.
    #[must_use]
    pub fn has_tripped(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Registered workers whose last pulse is older than the timeout at `now`.
    #[must_use]
    pub fn overdue(&self, now: Instant) -> Vec<WorkerId> {
        let timeout = self.config.read().timeout;
        let mut overdue: Vec<WorkerId> = self
            .last_pulse
            .lock()
            .iter()
            .filter(|(_, last)| now.saturating_duration_since(**last) > timeout)
            .map(|(worker, _)| *worker)
            .collect();
        overdue.sort_by_key(|worker| *worker as u8);
        overdue
    }

    /// Check the pulse table once.
    pub fn check(&self) -> WatchdogVerdict {
        let overdue = self.overdue(Instant::now());
        if overdue.is_empty() {
            return WatchdogVerdict::Healthy;
        }

        if !self.config.read().fatal_on_timeout {
            warn!(component = COMPONENT, overdue = ?overdue, "Workers overdue");
            return WatchdogVerdict::Overdue(overdue);
        }

        if self.tripped.swap(true, Ordering::AcqRel) {
            return WatchdogVerdict::Overdue(overdue);
        }

        WATCHDOG_TRIPS.inc();
        log_event!(error, COMPONENT, "Watchdog timeout", overdue = ?overdue);
        self.reset.on_timeout(&overdue);
        WatchdogVerdict::Tripped(overdue)
    }

    /// Check every `check_interval` until the watchdog trips.
    pub fn spawn_monitor(self: &Arc<Self>) -> JoinHandle<()> {
        let watchdog = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                let interval = watchdog.config.read().check_interval;
                tokio::time::sleep(interval).await;
                if let WatchdogVerdict::Tripped(_) = watchdog.check() {
                    return;
                }
            }
        })
    }
}

impl Heartbeat for Watchdog {
    fn register(&self, worker: WorkerId) {
        self.last_pulse.lock().insert(worker, Instant::now());
        debug!(component = COMPONENT, worker = %worker, "Worker registered");
    }

    fn pulse(&self, worker: WorkerId) {
        let registered = match self.last_pulse.lock().get_mut(&worker) {
            Some(last) => {
                *last = Instant::now();
                true
            }
            None => false,
        };

        if registered {
            WATCHDOG_PULSES.with_label_values(&[worker.name()]).inc();
        } else {
            debug!(component = COMPONENT, worker = %worker, "Pulse from unregistered worker ignored");
        }
    }
}
