//! Host stand-in for the radio.
//!
//! Starts disconnected. `begin` and `reconnect` associate immediately unless
//! the network has been forced down.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use sg_02_connection::{Credentials, NetworkStatusProvider};
use tracing::debug;

#[derive(Debug)]
pub struct SimulatedNetwork {
    connected: AtomicBool,
    reachable: AtomicBool,
    identifier: RwLock<String>,
    reconnects: AtomicU64,
}

impl SimulatedNetwork {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            reachable: AtomicBool::new(true),
            identifier: RwLock::new(String::new()),
            reconnects: AtomicU64::new(0),
        }
    }

    /// Change the identifier the radio reports (roaming to another SSID).
    pub fn set_identifier(&self, identifier: impl Into<String>) {
        *self.identifier.write() = identifier.into();
    }

    /// Drop the link and refuse to reassociate until `restore`.
    pub fn force_down(&self) {
        self.reachable.store(false, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        debug!("Simulated network forced down");
    }

    /// Allow the next reconnect to succeed.
    pub fn restore(&self) {
        self.reachable.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn reconnects(&self) -> u64 {
        self.reconnects.load(Ordering::SeqCst)
    }

    fn associate(&self) {
        if self.reachable.load(Ordering::SeqCst) {
            self.connected.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for SimulatedNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkStatusProvider for SimulatedNetwork {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn current_identifier(&self) -> String {
        if self.is_connected() {
            self.identifier.read().clone()
        } else {
            String::new()
        }
    }

    async fn begin(&self, credentials: &Credentials) {
        self.set_identifier(credentials.ssid.clone());
        self.associate();
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    async fn reconnect(&self) {
        self.reconnects.fetch_add(1, Ordering::SeqCst);
        self.associate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_disconnected_and_associates_on_begin() {
        let network = SimulatedNetwork::new();
        assert!(!network.is_connected());

        network.begin(&Credentials::open("Lab-SSID")).await;
        assert!(network.is_connected());
        assert_eq!(network.current_identifier(), "Lab-SSID");
    }

    #[tokio::test]
    async fn test_forced_down_refuses_reconnect_until_restored() {
        let network = SimulatedNetwork::new();
        network.begin(&Credentials::default()).await;
        network.force_down();

        network.reconnect().await;
        assert!(!network.is_connected());

        network.restore();
        network.reconnect().await;
        assert!(network.is_connected());
        assert_eq!(network.reconnects(), 2);
    }
}
