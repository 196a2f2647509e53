//! Outbound (Driven) ports for the connection supervisor.

use async_trait::async_trait;

use crate::config::Credentials;

/// The network stack the supervisor drives.
///
/// Association mechanics and their failure modes are opaque to the guard;
/// implementations only report state and accept requests.
#[async_trait]
pub trait NetworkStatusProvider: Send + Sync {
    /// Whether the device is currently associated.
    fn is_connected(&self) -> bool;

    /// Identifier (SSID) of the current association. Unspecified when
    /// disconnected.
    fn current_identifier(&self) -> String;

    /// Start associating with `credentials`.
    async fn begin(&self, credentials: &Credentials);

    /// Drop the current association, if any.
    async fn disconnect(&self);

    /// Re-associate with the last credentials.
    async fn reconnect(&self);
}
