//! # Guard Container
//!
//! Holds every component instance between construction and spawn.
//!
//! ## Initialization Order
//!
//! ```text
//! 1. Watchdog          (no dependencies)
//! 2. Whitelist         (populated for the initial mode by the policy controller)
//! 3. Channel           (capacity from config)
//! 4. Workers           (supervisor, monitor, alert handler)
//! ```

use std::sync::Arc;

use guard_telemetry::log_event;
use sg_01_whitelist::{WhitelistApi, WhitelistStore};
use sg_02_connection::ConnectionSupervisor;
use sg_03_monitor::NetworkMonitor;
use sg_04_alerting::AlertHandler;
use sg_05_policy::{PolicyController, PolicyError};
use sg_06_watchdog::Watchdog;
use shared_bus::{classification_channel, ChannelStats};
use shared_types::Heartbeat;
use thiserror::Error;

use crate::adapters::GuardPorts;
use crate::container::config::{ConfigError, GuardConfig};
use crate::COMPONENT;

/// Errors raised while building the container.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Initial whitelist build failed: {0}")]
    Policy(#[from] PolicyError),
}

/// Every component, built and wired but not yet running.
pub struct GuardContainer {
    pub whitelist: Arc<WhitelistStore>,
    pub watchdog: Arc<Watchdog>,
    pub policy: PolicyController,
    pub supervisor: ConnectionSupervisor,
    pub monitor: NetworkMonitor,
    pub alerts: AlertHandler,
    pub channel_stats: Arc<ChannelStats>,
    pub config: GuardConfig,
}

impl GuardContainer {
    /// Validate `config` and build every component.
    pub async fn build(config: GuardConfig, ports: GuardPorts) -> Result<Self, ContainerError> {
        config.validate()?;

        let watchdog = Arc::new(Watchdog::new(config.watchdog, ports.reset));
        let heartbeat: Arc<dyn Heartbeat> = watchdog.clone();

        let whitelist = Arc::new(WhitelistStore::new(config.whitelist.clone()));
        let whitelist_api: Arc<dyn WhitelistApi> = whitelist.clone();
        let policy = PolicyController::new(
            Arc::clone(&whitelist_api),
            ports.input,
            config.policy.clone(),
        );
        policy.initialize(config.policy.initial_mode).await?;

        let (publisher, subscription) = classification_channel(config.channel_capacity);
        let channel_stats = publisher.stats();

        let supervisor = ConnectionSupervisor::new(
            ports.network,
            Arc::clone(&heartbeat),
            config.connection.clone(),
        );
        let monitor = NetworkMonitor::new(
            supervisor.link(),
            whitelist_api,
            publisher,
            Arc::clone(&heartbeat),
            config.monitor.clone(),
        );
        let alerts = AlertHandler::new(
            subscription,
            ports.indicator,
            heartbeat,
            config.alerting.clone(),
        );

        log_event!(
            info,
            COMPONENT,
            "Components built",
            mode = %whitelist.mode(),
            channel_capacity = config.channel_capacity
        );

        Ok(Self {
            whitelist,
            watchdog,
            policy,
            supervisor,
            monitor,
            alerts,
            channel_stats,
            config,
        })
    }
}
