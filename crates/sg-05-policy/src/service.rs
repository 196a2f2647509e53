//! Policy controller.

use std::sync::Arc;

use guard_telemetry::{log_event, POLICY_REBUILD_FAILURES, POLICY_TOGGLES};
use sg_01_whitelist::WhitelistApi;
use shared_types::PolicyMode;
use tracing::warn;

use crate::config::PolicyConfig;
use crate::domain::{EdgeDetector, PolicyError};
use crate::ports::PolicyInput;
use crate::COMPONENT;

/// Applies policy changes to the whitelist.
pub struct PolicyController {
    whitelist: Arc<dyn WhitelistApi>,
    input: Arc<dyn PolicyInput>,
    edge: EdgeDetector,
    config: PolicyConfig,
}

impl PolicyController {
    pub fn new(
        whitelist: Arc<dyn WhitelistApi>,
        input: Arc<dyn PolicyInput>,
        config: PolicyConfig,
    ) -> Self {
        Self {
            whitelist,
            input,
            edge: EdgeDetector::new(),
            config,
        }
    }

    /// Current mode, as recorded by the store.
    #[must_use]
    pub fn mode(&self) -> PolicyMode {
        self.whitelist.mode()
    }

    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Startup rebuild. Returns the whitelist length.
    pub async fn initialize(&self, mode: PolicyMode) -> Result<usize, PolicyError> {
        let items = self.apply(mode).await?;
        log_event!(info, COMPONENT, "Policy initialized", mode = %mode, items);
        Ok(items)
    }

    /// Sample the input once; toggle on a press.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(mode))` - A press was detected and `mode` is now in force
    /// - `Ok(None)` - No press
    /// - `Err(PolicyError)` - A press was detected but the rebuild failed
    pub async fn poll_once(&mut self) -> Result<Option<PolicyMode>, PolicyError> {
        if !self.edge.observe(self.input.read_level()) {
            return Ok(None);
        }
        self.toggle().await.map(Some)
    }

    /// Flip the mode and rebuild.
    pub async fn toggle(&self) -> Result<PolicyMode, PolicyError> {
        let from = self.mode();
        let to = from.toggled();
        let items = self.set_mode(to).await?;
        log_event!(info, COMPONENT, "Policy toggled", from = %from, to = %to, items);
        Ok(to)
    }

    /// Apply `mode`. Setting the current mode rebuilds the same content.
    pub async fn set_mode(&self, mode: PolicyMode) -> Result<usize, PolicyError> {
        let previous = self.mode();
        let items = self.apply(mode).await?;
        if previous != mode {
            POLICY_TOGGLES.inc();
        }
        Ok(items)
    }

    async fn apply(&self, mode: PolicyMode) -> Result<usize, PolicyError> {
        let attempts = self.config.rebuild_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.whitelist.rebuild(mode).await {
                Ok(items) => return Ok(items),
                Err(e) => e,
            };
            warn!(
                component = COMPONENT,
                mode = %mode,
                attempt,
                attempts,
                error = %error,
                "Whitelist rebuild attempt failed"
            );

            if attempt == attempts {
                POLICY_REBUILD_FAILURES.inc();
                log_event!(
                    error,
                    COMPONENT,
                    "Policy change abandoned",
                    mode = %mode,
                    kept = %self.mode()
                );
                return Err(PolicyError::RebuildFailed {
                    mode,
                    attempts,
                    source: error,
                });
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InputLevel;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use sg_01_whitelist::{WhitelistConfig, WhitelistError, WhitelistStore, STRICT_SENTINEL};
    use shared_types::NetworkId;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// Plays back a fixed sequence of levels, then stays released.
    #[derive(Default)]
    struct ScriptedInput {
        levels: Mutex<VecDeque<InputLevel>>,
    }

    impl ScriptedInput {
        fn new(levels: &[InputLevel]) -> Arc<Self> {
            Arc::new(Self {
                levels: Mutex::new(levels.iter().copied().collect()),
            })
        }
    }

    impl PolicyInput for ScriptedInput {
        fn read_level(&self) -> InputLevel {
            self.levels.lock().pop_front().unwrap_or(InputLevel::Released)
        }
    }

    /// Whitelist whose first `failures` rebuilds time out.
    struct FlakyWhitelist {
        inner: WhitelistStore,
        failures: Mutex<u32>,
        calls: Mutex<u32>,
    }

    #[async_trait]
    impl WhitelistApi for FlakyWhitelist {
        async fn classify(&self, identifier: &NetworkId) -> bool {
            self.inner.classify(identifier).await
        }

        async fn rebuild(&self, mode: PolicyMode) -> Result<usize, WhitelistError> {
            *self.calls.lock() += 1;
            {
                let mut failures = self.failures.lock();
                if *failures > 0 {
                    *failures -= 1;
                    return Err(WhitelistError::LockTimeout {
                        operation: "rebuild",
                        waited: Duration::from_millis(200),
                    });
                }
            }
            self.inner.rebuild(mode).await
        }

        async fn snapshot(&self) -> Result<Vec<NetworkId>, WhitelistError> {
            self.inner.snapshot().await
        }

        fn mode(&self) -> PolicyMode {
            self.inner.mode()
        }
    }

    async fn flaky(failures: u32) -> Arc<FlakyWhitelist> {
        Arc::new(FlakyWhitelist {
            inner: WhitelistStore::with_mode(WhitelistConfig::default(), PolicyMode::Permissive)
                .await
                .unwrap(),
            failures: Mutex::new(failures),
            calls: Mutex::new(0),
        })
    }

    fn controller(whitelist: Arc<dyn WhitelistApi>, levels: &[InputLevel]) -> PolicyController {
        PolicyController::new(whitelist, ScriptedInput::new(levels), PolicyConfig::default())
    }

    #[tokio::test]
    async fn test_initialize_populates_store() {
        let store = Arc::new(WhitelistStore::default());
        let controller = controller(store.clone(), &[]);

        assert_eq!(controller.initialize(PolicyMode::Permissive).await, Ok(5));
        assert_eq!(controller.mode(), PolicyMode::Permissive);
    }

    #[tokio::test]
    async fn test_initialize_strict() {
        let store = Arc::new(WhitelistStore::default());
        let controller = controller(store.clone(), &[]);

        assert_eq!(controller.initialize(PolicyMode::Strict).await, Ok(4));
        assert!(!store.classify(&NetworkId::from(STRICT_SENTINEL)).await);
    }

    #[tokio::test]
    async fn test_press_toggles_once_per_edge() {
        use InputLevel::{Pressed, Released};
        let store = Arc::new(WhitelistStore::default());
        let mut controller = controller(store.clone(), &[Released, Pressed, Pressed, Released]);
        controller.initialize(PolicyMode::Permissive).await.unwrap();

        let mut toggles = Vec::new();
        for _ in 0..4 {
            if let Some(mode) = controller.poll_once().await.unwrap() {
                toggles.push(mode);
            }
        }

        assert_eq!(toggles, vec![PolicyMode::Strict]);
        assert_eq!(store.snapshot().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_permissive() {
        let store = Arc::new(WhitelistStore::default());
        let controller = controller(store.clone(), &[]);
        controller.initialize(PolicyMode::Permissive).await.unwrap();

        assert_eq!(controller.toggle().await, Ok(PolicyMode::Strict));
        assert_eq!(controller.toggle().await, Ok(PolicyMode::Permissive));
        assert_eq!(store.snapshot().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_set_same_mode_keeps_content() {
        let store = Arc::new(WhitelistStore::default());
        let controller = controller(store.clone(), &[]);
        controller.initialize(PolicyMode::Strict).await.unwrap();
        let before = store.snapshot().await.unwrap();

        assert_eq!(controller.set_mode(PolicyMode::Strict).await, Ok(4));
        assert_eq!(store.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_transient_lock_timeout_is_retried() {
        let whitelist = flaky(2).await;
        let controller = controller(whitelist.clone(), &[]);

        assert_eq!(controller.toggle().await, Ok(PolicyMode::Strict));
        assert_eq!(*whitelist.calls.lock(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_keep_previous_mode() {
        let whitelist = flaky(10).await;
        let controller = controller(whitelist.clone(), &[]);

        let err = controller.toggle().await.unwrap_err();
        assert!(matches!(
            err,
            PolicyError::RebuildFailed {
                mode: PolicyMode::Strict,
                attempts: 3,
                ..
            }
        ));
        assert_eq!(controller.mode(), PolicyMode::Permissive);
        assert_eq!(whitelist.snapshot().await.unwrap().len(), 5);
        assert_eq!(*whitelist.calls.lock(), 3);
    }
}
