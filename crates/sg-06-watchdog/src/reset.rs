//! What happens when the watchdog trips.

use guard_telemetry::log_event;
use shared_types::WorkerId;

use crate::COMPONENT;

/// Exit code that asks the service manager for a restart (`EX_TEMPFAIL`).
pub const RESTART_EXIT_CODE: i32 = 75;

/// Reaction to a missed liveness window. Called at most once.
pub trait ResetHandler: Send + Sync {
    fn on_timeout(&self, overdue: &[WorkerId]);
}

/// Terminates the process so the supervisor restarts the whole guard.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRestart {
    pub exit_code: i32,
}

impl Default for ProcessRestart {
    fn default() -> Self {
        Self {
            exit_code: RESTART_EXIT_CODE,
        }
    }
}

impl ResetHandler for ProcessRestart {
    fn on_timeout(&self, overdue: &[WorkerId]) {
        log_event!(
            error,
            COMPONENT,
            "Restarting guard",
            overdue = ?overdue,
            exit_code = self.exit_code
        );
        std::process::exit(self.exit_code);
    }
}
