//! # Classification Subscription
//!
//! The consuming side of the channel. Every wait is bounded.

use std::sync::Arc;
use std::time::Duration;

use shared_types::ClassificationMessage;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::debug;

use crate::stats::ChannelStats;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Every publisher was dropped and the channel is drained.
    #[error("Classification channel closed")]
    Closed,
}

/// Receiving half of the classification channel.
pub struct ClassificationSubscription {
    receiver: mpsc::Receiver<ClassificationMessage>,
    stats: Arc<ChannelStats>,
}

impl ClassificationSubscription {
    pub(crate) fn new(
        receiver: mpsc::Receiver<ClassificationMessage>,
        stats: Arc<ChannelStats>,
    ) -> Self {
        Self { receiver, stats }
    }

    /// Wait up to `timeout` for the next message.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - The oldest unread message
    /// - `Ok(None)` - Nothing arrived within `timeout`
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<ClassificationMessage>, SubscriptionError> {
        match tokio::time::timeout(timeout, self.receiver.recv()).await {
            Ok(Some(message)) => {
                self.stats.record_received();
                Ok(Some(message))
            }
            Ok(None) => Err(SubscriptionError::Closed),
            Err(_) => {
                debug!(timeout_ms = timeout.as_millis() as u64, "No classification received");
                Ok(None)
            }
        }
    }

    /// Take the next message without waiting.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(message))` - A message was available
    /// - `Ok(None)` - The channel is empty
    /// - `Err(SubscriptionError::Closed)` - The channel was closed
    pub fn try_recv(&mut self) -> Result<Option<ClassificationMessage>, SubscriptionError> {
        match self.receiver.try_recv() {
            Ok(message) => {
                self.stats.record_received();
                Ok(Some(message))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SubscriptionError::Closed),
        }
    }

    /// Number of unread messages.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    #[must_use]
    pub fn stats(&self) -> Arc<ChannelStats> {
        Arc::clone(&self.stats)
    }
}
