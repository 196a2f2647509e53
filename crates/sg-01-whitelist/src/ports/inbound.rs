//! Inbound (Driving) port for the whitelist.

use async_trait::async_trait;
use shared_types::{NetworkId, PolicyMode};

use crate::domain::WhitelistError;

/// Whitelist operations other components depend on.
///
/// Consumers hold an `Arc<dyn WhitelistApi>` rather than the concrete store.
#[async_trait]
pub trait WhitelistApi: Send + Sync {
    /// True iff `identifier` is authorized. Fail-closed on lock timeout.
    async fn classify(&self, identifier: &NetworkId) -> bool;

    /// Replace the content for `mode`, returning the new length.
    ///
    /// # Errors
    ///
    /// `LockTimeout` if the store could not be locked within its bound; the
    /// previous content and mode are kept.
    async fn rebuild(&self, mode: PolicyMode) -> Result<usize, WhitelistError>;

    /// Copy of the current entries.
    async fn snapshot(&self) -> Result<Vec<NetworkId>, WhitelistError>;

    /// Mode the current content was built for.
    fn mode(&self) -> PolicyMode;
}
