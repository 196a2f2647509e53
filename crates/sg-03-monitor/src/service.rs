//! The sampling loop.

use std::sync::Arc;

use guard_telemetry::{log_event, CLASSIFICATIONS, CLASSIFICATIONS_DROPPED};
use sg_01_whitelist::WhitelistApi;
use sg_02_connection::LinkStatus;
use shared_bus::{ClassificationPublisher, PublishOutcome};
use shared_types::{ClassificationMessage, Heartbeat, WorkerId};
use tracing::debug;

use crate::config::MonitorConfig;
use crate::COMPONENT;

/// Samples the link and publishes classifications.
pub struct NetworkMonitor {
    link: LinkStatus,
    whitelist: Arc<dyn WhitelistApi>,
    publisher: ClassificationPublisher,
    heartbeat: Arc<dyn Heartbeat>,
    config: MonitorConfig,
    next_sequence: u64,
}

impl NetworkMonitor {
    pub fn new(
        link: LinkStatus,
        whitelist: Arc<dyn WhitelistApi>,
        publisher: ClassificationPublisher,
        heartbeat: Arc<dyn Heartbeat>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            link,
            whitelist,
            publisher,
            heartbeat,
            config,
            next_sequence: 0,
        }
    }

    /// Classify the current network without publishing.
    ///
    /// A down link bypasses the whitelist and yields the disconnected
    /// sentinel, never authorized.
    pub async fn sample(&mut self) -> ClassificationMessage {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let Some(identifier) = self.link.current() else {
            CLASSIFICATIONS.with_label_values(&["disconnected"]).inc();
            return ClassificationMessage::disconnected(sequence);
        };

        let authorized = self.whitelist.classify(&identifier).await;
        let verdict = if authorized { "authorized" } else { "unauthorized" };
        CLASSIFICATIONS.with_label_values(&[verdict]).inc();

        ClassificationMessage::new(identifier, authorized, sequence)
    }

    /// Sample once and publish the result.
    pub async fn tick(&mut self) -> PublishOutcome {
        let message = self.sample().await;
        let sequence = message.sequence;
        let outcome = self.publisher.publish(message);

        if let PublishOutcome::Dropped(reason) = outcome {
            CLASSIFICATIONS_DROPPED.inc();
            debug!(
                component = COMPONENT,
                sequence,
                reason = ?reason,
                "Classification dropped"
            );
        }
        outcome
    }

    /// Sequence number the next sample will carry.
    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Run forever: publish, pulse, sleep.
    pub async fn run(mut self) {
        let worker = WorkerId::NetworkMonitor;
        self.heartbeat.register(worker);
        log_event!(
            info,
            COMPONENT,
            "Network monitor started",
            priority = worker.priority_hint(),
            period_ms = self.config.sample_period.as_millis() as u64
        );

        loop {
            self.tick().await;
            self.heartbeat.pulse(worker);
            tokio::time::sleep(self.config.sample_period).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use sg_01_whitelist::{WhitelistConfig, WhitelistStore, STRICT_SENTINEL};
    use sg_02_connection::{Credentials, NetworkStatusProvider};
    use shared_bus::{classification_channel, DropReason};
    use shared_types::{PolicyMode, RecordingHeartbeat};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    struct FixedLink {
        connected: AtomicBool,
        ssid: Mutex<String>,
    }

    impl FixedLink {
        fn up(ssid: &str) -> Arc<Self> {
            Arc::new(Self {
                connected: AtomicBool::new(true),
                ssid: Mutex::new(ssid.to_string()),
            })
        }

        fn down() -> Arc<Self> {
            let link = Self::up("");
            link.connected.store(false, Ordering::SeqCst);
            link
        }
    }

    #[async_trait]
    impl NetworkStatusProvider for FixedLink {
        fn is_connected(&self) -> bool {
            self.connected.load(Ordering::SeqCst)
        }

        fn current_identifier(&self) -> String {
            self.ssid.lock().clone()
        }

        async fn begin(&self, _credentials: &Credentials) {}
        async fn disconnect(&self) {}
        async fn reconnect(&self) {}
    }

    async fn monitor(
        link: Arc<FixedLink>,
        mode: PolicyMode,
        capacity: usize,
    ) -> (
        NetworkMonitor,
        shared_bus::ClassificationSubscription,
        Arc<RecordingHeartbeat>,
    ) {
        let store = WhitelistStore::with_mode(WhitelistConfig::default(), mode)
            .await
            .unwrap();
        let (publisher, subscription) = classification_channel(capacity);
        let heartbeat = Arc::new(RecordingHeartbeat::new());
        let monitor = NetworkMonitor::new(
            LinkStatus::new(link),
            Arc::new(store),
            publisher,
            Arc::clone(&heartbeat) as Arc<dyn Heartbeat>,
            MonitorConfig::default(),
        );
        (monitor, subscription, heartbeat)
    }

    #[tokio::test]
    async fn test_whitelisted_network_is_authorized() {
        let (mut monitor, _sub, _) =
            monitor(FixedLink::up("CorpNet-2G"), PolicyMode::Permissive, 8).await;
        let msg = monitor.sample().await;
        assert!(msg.authorized);
        assert_eq!(msg.identifier.as_str(), "CorpNet-2G");
    }

    #[tokio::test]
    async fn test_sentinel_unauthorized_in_strict_mode() {
        let (mut monitor, _sub, _) =
            monitor(FixedLink::up(STRICT_SENTINEL), PolicyMode::Strict, 8).await;
        assert!(!monitor.sample().await.authorized);
    }

    #[tokio::test]
    async fn test_down_link_yields_disconnected_sentinel() {
        let (mut monitor, _sub, _) = monitor(FixedLink::down(), PolicyMode::Permissive, 8).await;
        let msg = monitor.sample().await;
        assert!(msg.identifier.is_disconnected());
        assert!(!msg.authorized);
    }

    /// Reports connected, then loses the link before the identifier read.
    struct DroppingLink;

    #[async_trait]
    impl NetworkStatusProvider for DroppingLink {
        fn is_connected(&self) -> bool {
            true
        }

        fn current_identifier(&self) -> String {
            String::new()
        }

        async fn begin(&self, _credentials: &Credentials) {}
        async fn disconnect(&self) {}
        async fn reconnect(&self) {}
    }

    #[tokio::test]
    async fn test_link_lost_mid_sample_yields_disconnected_sentinel() {
        let store = WhitelistStore::with_mode(WhitelistConfig::default(), PolicyMode::Permissive)
            .await
            .unwrap();
        let (publisher, _sub) = classification_channel(8);
        let mut monitor = NetworkMonitor::new(
            LinkStatus::new(Arc::new(DroppingLink)),
            Arc::new(store),
            publisher,
            Arc::new(RecordingHeartbeat::new()),
            MonitorConfig::default(),
        );

        let msg = monitor.sample().await;
        assert!(msg.identifier.is_disconnected());
        assert!(!msg.authorized);
    }

    #[tokio::test]
    async fn test_long_identifier_is_truncated_before_classification() {
        let raw = format!("{}{}", "N".repeat(32), "-tail");
        let (mut monitor, _sub, _) =
            monitor(FixedLink::up(&raw), PolicyMode::Permissive, 8).await;
        let msg = monitor.sample().await;
        assert_eq!(msg.identifier.char_len(), 32);
        assert!(!msg.authorized);
    }

    #[tokio::test]
    async fn test_sequence_increases_per_sample() {
        let (mut monitor, mut sub, _) =
            monitor(FixedLink::up("Lab-SSID"), PolicyMode::Permissive, 8).await;
        for _ in 0..3 {
            assert!(monitor.tick().await.is_delivered());
        }
        let sequences: Vec<u64> = std::iter::from_fn(|| sub.try_recv().unwrap())
            .map(|m| m.sequence)
            .collect();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(monitor.next_sequence(), 3);
    }

    #[tokio::test]
    async fn test_full_channel_drops_without_blocking() {
        let (mut monitor, _sub, _) =
            monitor(FixedLink::up("Lab-SSID"), PolicyMode::Permissive, 1).await;
        assert!(monitor.tick().await.is_delivered());
        assert_eq!(
            monitor.tick().await,
            PublishOutcome::Dropped(DropReason::Full)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_pulses_even_when_channel_is_full() {
        let (monitor, _sub, heartbeat) =
            monitor(FixedLink::up("Lab-SSID"), PolicyMode::Permissive, 1).await;

        let handle = tokio::spawn(monitor.run());
        // Samples at 0, 1.5, 3.0 and 4.5 s
        tokio::time::sleep(Duration::from_millis(4600)).await;
        handle.abort();

        assert!(heartbeat.is_registered(WorkerId::NetworkMonitor));
        assert_eq!(heartbeat.pulses(WorkerId::NetworkMonitor), 4);
    }
}
