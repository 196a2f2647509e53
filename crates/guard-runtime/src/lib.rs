//! # Guard Runtime Library
//!
//! Builds and runs the guard. The `ssid-guard` binary in `main.rs` adds
//! configuration loading, telemetry and signal handling on top.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and component construction
//! - `adapters/` - Host implementations of the component ports
//! - `wiring/` - Worker spawning
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Build the watchdog and populate the whitelist for the initial mode
//! 3. Issue the initial network association
//! 4. Start the watchdog monitor
//! 5. Spawn the three workers
//! 6. Sample the policy input on the control loop until shutdown

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod container;
pub mod wiring;

use std::sync::Arc;
use std::time::Duration;

use guard_telemetry::log_event;
use sg_01_whitelist::WhitelistStore;
use sg_05_policy::PolicyController;
use sg_06_watchdog::Watchdog;
use shared_bus::ChannelStats;
use shared_types::PolicyMode;
use tokio::task::JoinHandle;
use tracing::warn;

pub use adapters::GuardPorts;
pub use container::{ConfigError, ContainerError, GuardConfig, GuardContainer};
pub use wiring::WorkerHandles;

/// Component name used in log events.
pub const COMPONENT: &str = "sg-runtime";

/// A running guard.
pub struct GuardRuntime {
    policy: PolicyController,
    whitelist: Arc<WhitelistStore>,
    watchdog: Arc<Watchdog>,
    channel_stats: Arc<ChannelStats>,
    workers: WorkerHandles,
    watchdog_task: JoinHandle<()>,
    poll_interval: Duration,
}

impl GuardRuntime {
    /// Build every component and start the workers.
    pub async fn start(config: GuardConfig, ports: GuardPorts) -> Result<Self, ContainerError> {
        let container = GuardContainer::build(config, ports).await?;
        Ok(Self::launch(container).await)
    }

    /// Start an already built container.
    pub async fn launch(container: GuardContainer) -> Self {
        let GuardContainer {
            whitelist,
            watchdog,
            policy,
            supervisor,
            monitor,
            alerts,
            channel_stats,
            config,
        } = container;

        supervisor.start().await;
        let watchdog_task = watchdog.spawn_monitor();
        let workers = wiring::spawn_workers(supervisor, monitor, alerts);

        log_event!(
            info,
            COMPONENT,
            "Setup complete",
            version = env!("CARGO_PKG_VERSION"),
            mode = %whitelist.mode()
        );

        Self {
            policy,
            whitelist,
            watchdog,
            channel_stats,
            workers,
            watchdog_task,
            poll_interval: config.policy.poll_interval,
        }
    }

    /// Sample the policy input once.
    pub async fn poll_policy(&mut self) -> Option<PolicyMode> {
        match self.policy.poll_once().await {
            Ok(toggled) => toggled,
            Err(e) => {
                warn!(component = COMPONENT, error = %e, "Policy toggle failed");
                None
            }
        }
    }

    /// Sample the policy input every poll interval, forever.
    pub async fn run_control_loop(&mut self) {
        loop {
            self.poll_policy().await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        self.policy.mode()
    }

    #[must_use]
    pub fn whitelist(&self) -> Arc<WhitelistStore> {
        Arc::clone(&self.whitelist)
    }

    #[must_use]
    pub fn watchdog(&self) -> Arc<Watchdog> {
        Arc::clone(&self.watchdog)
    }

    #[must_use]
    pub fn channel_stats(&self) -> Arc<ChannelStats> {
        Arc::clone(&self.channel_stats)
    }

    pub fn workers(&mut self) -> &mut WorkerHandles {
        &mut self.workers
    }

    /// Stop every task.
    pub fn shutdown(mut self) {
        self.workers.abort_all();
        self.watchdog_task.abort();
        log_event!(info, COMPONENT, "Shutdown complete");
    }
}
