//! # Liveness Port
//!
//! Workers report progress through [`Heartbeat`]. The watchdog crate provides
//! the production implementation; [`RecordingHeartbeat`] is an in-memory
//! implementation for tests and for running a worker without supervision.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::entities::WorkerId;

/// Liveness reporting contract for long-running workers.
///
/// A worker calls `register` once before entering its loop and `pulse` at
/// least once per watchdog window afterwards.
pub trait Heartbeat: Send + Sync {
    /// Start supervising `worker`.
    fn register(&self, worker: WorkerId);

    /// Confirm that `worker` made progress.
    fn pulse(&self, worker: WorkerId);
}

/// Heartbeat that only counts calls.
#[derive(Debug, Default)]
pub struct RecordingHeartbeat {
    registered: Mutex<Vec<WorkerId>>,
    pulses: Mutex<HashMap<WorkerId, u64>>,
}

impl RecordingHeartbeat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pulses received from `worker`.
    #[must_use]
    pub fn pulses(&self, worker: WorkerId) -> u64 {
        self.pulses.lock().get(&worker).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_registered(&self, worker: WorkerId) -> bool {
        self.registered.lock().contains(&worker)
    }
}

impl Heartbeat for RecordingHeartbeat {
    fn register(&self, worker: WorkerId) {
        let mut registered = self.registered.lock();
        if !registered.contains(&worker) {
            registered.push(worker);
        }
    }

    fn pulse(&self, worker: WorkerId) {
        *self.pulses.lock().entry(worker).or_insert(0) += 1;
    }
}
