//! # Worker Wiring
//!
//! Spawns the three supervised workers as tokio tasks.
//!
//! ```text
//! ┌──────────────────────┐  link   ┌──────────────────┐  channel  ┌────────────────┐
//! │ ConnectionSupervisor │ ──────→ │  NetworkMonitor  │ ────────→ │  AlertHandler  │
//! │   priority hint 3    │         │ priority hint 4  │           │ priority hint 5│
//! └──────────┬───────────┘         └────────┬─────────┘           └───────┬────────┘
//!            │ pulse                        │ pulse                       │ pulse
//!            └──────────────────────────────┼─────────────────────────────┘
//!                                           ▼
//!                                       Watchdog
//! ```
//!
//! Tokio has no task priorities; the hints are logged so a deployment that
//! maps workers onto dedicated threads can honour them.

use std::collections::HashMap;

use guard_telemetry::log_event;
use sg_02_connection::ConnectionSupervisor;
use sg_03_monitor::NetworkMonitor;
use sg_04_alerting::AlertHandler;
use shared_types::WorkerId;
use tokio::task::JoinHandle;

use crate::COMPONENT;

/// Join handles of the running workers.
pub struct WorkerHandles {
    handles: HashMap<WorkerId, JoinHandle<()>>,
}

impl WorkerHandles {
    /// Stop one worker. Used to simulate a hung task.
    pub fn abort(&mut self, worker: WorkerId) {
        if let Some(handle) = self.handles.remove(&worker) {
            handle.abort();
            log_event!(warn, COMPONENT, "Worker aborted", worker = %worker);
        }
    }

    /// Stop every worker.
    pub fn abort_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    /// True if `worker` was spawned and has not returned or been aborted.
    #[must_use]
    pub fn is_running(&self, worker: WorkerId) -> bool {
        self.handles
            .get(&worker)
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Spawn the supervised workers.
pub fn spawn_workers(
    supervisor: ConnectionSupervisor,
    monitor: NetworkMonitor,
    alerts: AlertHandler,
) -> WorkerHandles {
    let mut handles = HashMap::new();

    handles.insert(WorkerId::ConnectionSupervisor, tokio::spawn(supervisor.run()));
    handles.insert(WorkerId::NetworkMonitor, tokio::spawn(monitor.run()));
    handles.insert(WorkerId::AlertHandler, tokio::spawn(alerts.run()));

    for worker in WorkerId::all() {
        log_event!(
            info,
            COMPONENT,
            "Worker spawned",
            worker = %worker,
            priority = worker.priority_hint()
        );
    }

    WorkerHandles { handles }
}
