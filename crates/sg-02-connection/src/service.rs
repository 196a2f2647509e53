//! Supervisor loop and the read-only link handle.

use std::sync::Arc;
use std::time::Duration;

use guard_telemetry::{log_event, RECONNECT_ATTEMPTS};
use shared_types::{Heartbeat, NetworkId, WorkerId};
use tracing::debug;

use crate::config::SupervisorConfig;
use crate::ports::NetworkStatusProvider;
use crate::COMPONENT;

/// Read-only view of the supervised link.
///
/// Cheap to clone; handed to the network monitor.
#[derive(Clone)]
pub struct LinkStatus {
    provider: Arc<dyn NetworkStatusProvider>,
}

impl LinkStatus {
    pub fn new(provider: Arc<dyn NetworkStatusProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.provider.is_connected()
    }

    /// Current identifier, bounded to 32 characters.
    #[must_use]
    pub fn identifier(&self) -> NetworkId {
        NetworkId::new(self.provider.current_identifier())
    }

    /// Identifier of the current association, or `None` while the link is
    /// down.
    ///
    /// An empty identifier counts as down: the link can drop between the
    /// connection check and the identifier read.
    #[must_use]
    pub fn current(&self) -> Option<NetworkId> {
        if !self.provider.is_connected() {
            return None;
        }
        let raw = self.provider.current_identifier();
        if raw.is_empty() {
            return None;
        }
        Some(NetworkId::new(raw))
    }
}

/// What one supervisor iteration found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCheck {
    /// Link was up; nothing to do.
    Connected,
    /// Link was down; a reconnect cycle was issued.
    Reconnecting,
}

/// Keeps the network association alive.
pub struct ConnectionSupervisor {
    provider: Arc<dyn NetworkStatusProvider>,
    heartbeat: Arc<dyn Heartbeat>,
    config: SupervisorConfig,
}

impl ConnectionSupervisor {
    pub fn new(
        provider: Arc<dyn NetworkStatusProvider>,
        heartbeat: Arc<dyn Heartbeat>,
        config: SupervisorConfig,
    ) -> Self {
        Self {
            provider,
            heartbeat,
            config,
        }
    }

    /// Handle for observers of the link.
    #[must_use]
    pub fn link(&self) -> LinkStatus {
        LinkStatus::new(Arc::clone(&self.provider))
    }

    #[must_use]
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Issue the initial association.
    pub async fn start(&self) {
        log_event!(
            info,
            COMPONENT,
            "Associating",
            ssid = %self.config.credentials.ssid
        );
        self.provider.begin(&self.config.credentials).await;
    }

    /// One iteration's decision: reconnect if the link is down.
    ///
    /// Does not include the post-check wait; see [`Self::wait_after`].
    pub async fn check_once(&self) -> LinkCheck {
        if self.provider.is_connected() {
            debug!(component = COMPONENT, "Link up");
            return LinkCheck::Connected;
        }

        log_event!(warn, COMPONENT, "Not connected, retrying");
        RECONNECT_ATTEMPTS.inc();
        self.provider.disconnect().await;
        tokio::time::sleep(self.config.settle_delay).await;
        self.provider.reconnect().await;
        LinkCheck::Reconnecting
    }

    /// Wait applied after a check with outcome `check`.
    #[must_use]
    pub fn wait_after(&self, check: LinkCheck) -> Duration {
        match check {
            LinkCheck::Connected => self.config.idle_interval,
            LinkCheck::Reconnecting => self.config.retry_interval,
        }
    }

    /// Run forever, pulsing the watchdog once per iteration.
    pub async fn run(self) {
        let worker = WorkerId::ConnectionSupervisor;
        self.heartbeat.register(worker);
        log_event!(
            info,
            COMPONENT,
            "Connection supervisor started",
            priority = worker.priority_hint()
        );

        loop {
            let check = self.check_once().await;
            tokio::time::sleep(self.wait_after(check)).await;
            self.heartbeat.pulse(worker);
        }
    }
}
