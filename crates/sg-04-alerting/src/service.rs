//! The consuming loop.

use std::sync::Arc;

use guard_telemetry::{log_alert, log_event, ALERTS_RAISED, AUTHORIZED_OBSERVATIONS};
use shared_bus::{ClassificationSubscription, SubscriptionError};
use shared_types::{ClassificationMessage, Heartbeat, WorkerId};

use crate::config::AlertConfig;
use crate::ports::AlertIndicator;
use crate::COMPONENT;

/// What the handler did with one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Logged as OK.
    Authorized,
    /// Logged as ALERT and blinked.
    Alerted,
}

/// Drains the classification channel.
pub struct AlertHandler {
    subscription: ClassificationSubscription,
    indicator: Arc<dyn AlertIndicator>,
    heartbeat: Arc<dyn Heartbeat>,
    config: AlertConfig,
}

impl AlertHandler {
    pub fn new(
        subscription: ClassificationSubscription,
        indicator: Arc<dyn AlertIndicator>,
        heartbeat: Arc<dyn Heartbeat>,
        config: AlertConfig,
    ) -> Self {
        Self {
            subscription,
            indicator,
            heartbeat,
            config,
        }
    }

    /// React to one classification.
    pub async fn handle(&self, message: &ClassificationMessage) -> AlertOutcome {
        if message.authorized {
            AUTHORIZED_OBSERVATIONS.inc();
            log_event!(
                info,
                COMPONENT,
                "OK",
                identifier = %message.identifier,
                sequence = message.sequence
            );
            return AlertOutcome::Authorized;
        }

        ALERTS_RAISED.inc();
        log_alert!(
            COMPONENT,
            "Unauthorized network",
            message.identifier,
            sequence = message.sequence
        );
        self.blink().await;
        AlertOutcome::Alerted
    }

    /// Drive the configured number of on/off cycles.
    pub async fn blink(&self) {
        for _ in 0..self.config.blink_cycles {
            self.indicator.set_indicator(true);
            tokio::time::sleep(self.config.blink_phase).await;
            self.indicator.set_indicator(false);
            tokio::time::sleep(self.config.blink_phase).await;
        }
    }

    /// One bounded receive, and handling if something arrived.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(outcome))` - A message was handled
    /// - `Ok(None)` - The receive timed out
    /// - `Err(SubscriptionError::Closed)` - The producer is gone
    pub async fn poll_once(&mut self) -> Result<Option<AlertOutcome>, SubscriptionError> {
        match self
            .subscription
            .recv_timeout(self.config.receive_timeout)
            .await?
        {
            Some(message) => Ok(Some(self.handle(&message).await)),
            None => Ok(None),
        }
    }

    /// Run until the channel closes.
    pub async fn run(mut self) {
        let worker = WorkerId::AlertHandler;
        self.heartbeat.register(worker);
        log_event!(
            info,
            COMPONENT,
            "Alert handler started",
            priority = worker.priority_hint()
        );

        loop {
            let result = self.poll_once().await;
            self.heartbeat.pulse(worker);
            if let Err(e) = result {
                log_event!(error, COMPONENT, "Alert handler stopping", error = %e);
                return;
            }
        }
    }
}
