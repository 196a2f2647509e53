//! # Whitelist Store
//!
//! A bounded, mutex-protected list of authorized identifiers.
//!
//! Every operation that touches the list acquires the mutex with a bounded
//! wait. The policy mode the list was built for is stored under the same
//! mutex and mirrored into an atomic that is only written while the mutex is
//! held, so `mode()` never disagrees with the content for longer than one
//! critical section.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use guard_telemetry::{log_event, WHITELIST_LOCK_TIMEOUTS, WHITELIST_REBUILDS};
use shared_types::{NetworkId, PolicyMode};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use super::defaults::DefaultWhitelist;
use super::errors::WhitelistError;
use crate::ports::WhitelistApi;
use crate::COMPONENT;

/// Maximum number of identifiers the store holds.
pub const WHITELIST_CAPACITY: usize = 8;

/// Default bound on every lock acquisition.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(200);

/// Whitelist configuration.
#[derive(Debug, Clone)]
pub struct WhitelistConfig {
    /// The set every rebuild starts from.
    pub defaults: DefaultWhitelist,
    /// Bound on lock acquisition.
    pub lock_wait: Duration,
    /// Maximum stored identifiers.
    pub capacity: usize,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultWhitelist::default(),
            lock_wait: DEFAULT_LOCK_WAIT,
            capacity: WHITELIST_CAPACITY,
        }
    }
}

/// State guarded by the store mutex.
#[derive(Debug)]
struct WhitelistState {
    entries: Vec<NetworkId>,
    mode: PolicyMode,
}

/// Mutex-protected whitelist shared by the monitor and the policy controller.
#[derive(Debug)]
pub struct WhitelistStore {
    state: Mutex<WhitelistState>,
    strict: AtomicBool,
    config: WhitelistConfig,
}

impl WhitelistStore {
    /// Create an empty store. Call `rebuild` before first use.
    pub fn new(config: WhitelistConfig) -> Self {
        Self {
            state: Mutex::new(WhitelistState {
                entries: Vec::with_capacity(config.capacity),
                mode: PolicyMode::Permissive,
            }),
            strict: AtomicBool::new(false),
            config,
        }
    }

    /// Create a store and populate it for `mode`.
    pub async fn with_mode(
        config: WhitelistConfig,
        mode: PolicyMode,
    ) -> Result<Self, WhitelistError> {
        let store = Self::new(config);
        store.rebuild(mode).await?;
        Ok(store)
    }

    async fn lock(
        &self,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, WhitelistState>, WhitelistError> {
        match tokio::time::timeout(self.config.lock_wait, self.state.lock()).await {
            Ok(guard) => Ok(guard),
            Err(_) => {
                WHITELIST_LOCK_TIMEOUTS.with_label_values(&[operation]).inc();
                Err(WhitelistError::LockTimeout {
                    operation,
                    waited: self.config.lock_wait,
                })
            }
        }
    }

    /// True iff `identifier` is currently whitelisted.
    ///
    /// Fail-closed: a lock timeout yields `false`.
    pub async fn classify(&self, identifier: &NetworkId) -> bool {
        match self.lock("classify").await {
            Ok(state) => state.entries.iter().any(|entry| entry == identifier),
            Err(e) => {
                warn!(
                    component = COMPONENT,
                    identifier = %identifier,
                    error = %e,
                    "Classification failed closed"
                );
                false
            }
        }
    }

    /// Replace the content with the default set filtered for `mode`.
    ///
    /// Returns the new length. On lock timeout the previous content and mode
    /// are kept and `LockTimeout` is returned.
    pub async fn rebuild(&self, mode: PolicyMode) -> Result<usize, WhitelistError> {
        let mut state = self.lock("rebuild").await?;

        state.entries.clear();
        for identifier in self.config.defaults.for_mode(mode) {
            if state.entries.len() == self.config.capacity {
                warn!(
                    component = COMPONENT,
                    capacity = self.config.capacity,
                    skipped = %identifier,
                    "Default whitelist exceeds capacity"
                );
                break;
            }
            state.entries.push(identifier.clone());
        }
        state.mode = mode;
        self.strict.store(mode.is_strict(), Ordering::Release);
        let len = state.entries.len();
        drop(state);

        WHITELIST_REBUILDS.inc();
        log_event!(info, COMPONENT, "Whitelist rebuilt", mode = %mode, items = len);
        Ok(len)
    }

    /// Copy of the current entries.
    pub async fn snapshot(&self) -> Result<Vec<NetworkId>, WhitelistError> {
        let state = self.lock("snapshot").await?;
        debug!(
            component = COMPONENT,
            mode = %state.mode,
            items = state.entries.len(),
            "Whitelist snapshot"
        );
        Ok(state.entries.clone())
    }

    /// Mode the current content was built for. Lock-free.
    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        if self.strict.load(Ordering::Acquire) {
            PolicyMode::Strict
        } else {
            PolicyMode::Permissive
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        self.config.lock_wait
    }

    #[must_use]
    pub fn defaults(&self) -> &DefaultWhitelist {
        &self.config.defaults
    }
}

impl Default for WhitelistStore {
    fn default() -> Self {
        Self::new(WhitelistConfig::default())
    }
}

#[async_trait]
impl WhitelistApi for WhitelistStore {
    async fn classify(&self, identifier: &NetworkId) -> bool {
        WhitelistStore::classify(self, identifier).await
    }

    async fn rebuild(&self, mode: PolicyMode) -> Result<usize, WhitelistError> {
        WhitelistStore::rebuild(self, mode).await
    }

    async fn snapshot(&self) -> Result<Vec<NetworkId>, WhitelistError> {
        WhitelistStore::snapshot(self).await
    }

    fn mode(&self) -> PolicyMode {
        WhitelistStore::mode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::{DEFAULT_IDENTIFIERS, STRICT_SENTINEL};
    use std::sync::Arc;

    async fn permissive_store() -> WhitelistStore {
        WhitelistStore::with_mode(WhitelistConfig::default(), PolicyMode::Permissive)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = WhitelistStore::default();
        assert!(store.snapshot().await.unwrap().is_empty());
        assert!(!store.classify(&NetworkId::from("CorpNet-5G")).await);
    }

    #[tokio::test]
    async fn test_present_identifiers_classify_true() {
        let store = permissive_store().await;
        for id in DEFAULT_IDENTIFIERS {
            assert!(store.classify(&NetworkId::from(id)).await, "{id} should pass");
        }
    }

    #[tokio::test]
    async fn test_absent_identifiers_classify_false() {
        let store = permissive_store().await;
        for id in ["Rogue-AP", "corpnet-5g", "CorpNet-5G ", "", "<disconnected>"] {
            assert!(!store.classify(&NetworkId::from(id)).await, "{id:?} should fail");
        }
    }

    #[tokio::test]
    async fn test_classify_matches_on_truncated_identifier() {
        let long = format!("{}{}", "X".repeat(32), "-suffix");
        let defaults = DefaultWhitelist::new(
            [long.as_str(), "B", "C", "D", "E"],
            "B",
        )
        .unwrap();
        let config = WhitelistConfig {
            defaults,
            ..WhitelistConfig::default()
        };
        let store = WhitelistStore::with_mode(config, PolicyMode::Permissive)
            .await
            .unwrap();

        // Only the first 32 characters take part in the comparison
        assert!(store.classify(&NetworkId::new("X".repeat(32) + "-other")).await);
    }

    #[tokio::test]
    async fn test_strict_removes_only_sentinel() {
        let store = permissive_store().await;
        let before = store.snapshot().await.unwrap();

        assert_eq!(store.rebuild(PolicyMode::Strict).await.unwrap(), 4);
        let after = store.snapshot().await.unwrap();

        let removed: Vec<_> = before.iter().filter(|id| !after.contains(id)).collect();
        assert_eq!(removed, vec![&NetworkId::from(STRICT_SENTINEL)]);
        assert!(!store.classify(&NetworkId::from(STRICT_SENTINEL)).await);
        assert_eq!(store.mode(), PolicyMode::Strict);
    }

    #[tokio::test]
    async fn test_toggle_back_restores_full_set() {
        let store = permissive_store().await;
        let original = store.snapshot().await.unwrap();

        store.rebuild(PolicyMode::Strict).await.unwrap();
        store.rebuild(PolicyMode::Permissive).await.unwrap();

        assert_eq!(store.snapshot().await.unwrap(), original);
        assert_eq!(store.mode(), PolicyMode::Permissive);
    }

    #[tokio::test]
    async fn test_same_mode_twice_is_noop_on_content() {
        let store = permissive_store().await;
        store.rebuild(PolicyMode::Strict).await.unwrap();
        let first = store.snapshot().await.unwrap();
        store.rebuild(PolicyMode::Strict).await.unwrap();
        assert_eq!(store.snapshot().await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_rebuild_stops_at_capacity() {
        let defaults = DefaultWhitelist::new(
            ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"],
            "J",
        )
        .unwrap();
        let config = WhitelistConfig {
            defaults,
            ..WhitelistConfig::default()
        };
        let store = WhitelistStore::with_mode(config, PolicyMode::Permissive)
            .await
            .unwrap();

        let entries = store.snapshot().await.unwrap();
        assert_eq!(entries.len(), WHITELIST_CAPACITY);
        assert_eq!(entries.first(), Some(&NetworkId::from("A")));
        assert_eq!(entries.last(), Some(&NetworkId::from("H")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_classify_fails_closed_under_contention() {
        let store = permissive_store().await;
        let _held = store.state.lock().await;

        let start = tokio::time::Instant::now();
        let authorized = store.classify(&NetworkId::from("CorpNet-5G")).await;

        let elapsed = start.elapsed();
        assert!(!authorized);
        assert!(elapsed >= DEFAULT_LOCK_WAIT);
        assert!(elapsed < DEFAULT_LOCK_WAIT + Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rebuild_timeout_keeps_previous_content_and_mode() {
        let store = permissive_store().await;
        let held = store.state.lock().await;

        let result = store.rebuild(PolicyMode::Strict).await;
        assert_eq!(
            result,
            Err(WhitelistError::LockTimeout {
                operation: "rebuild",
                waited: DEFAULT_LOCK_WAIT,
            })
        );
        assert_eq!(store.mode(), PolicyMode::Permissive);

        drop(held);
        assert_eq!(store.snapshot().await.unwrap().len(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_classify_and_rebuild() {
        let store = Arc::new(permissive_store().await);
        let always_present = NetworkId::from("Lab-SSID");

        let toggler = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..50 {
                    let mode = if i % 2 == 0 {
                        PolicyMode::Strict
                    } else {
                        PolicyMode::Permissive
                    };
                    store.rebuild(mode).await.unwrap();
                }
            })
        };

        // Never partially rebuilt: an entry present in both modes is always found
        for _ in 0..200 {
            assert!(store.classify(&always_present).await);
        }
        toggler.await.unwrap();
    }
}
