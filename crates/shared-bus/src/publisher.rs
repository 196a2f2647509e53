//! # Classification Publisher
//!
//! The producing side of the channel. Publishing never waits.

use std::sync::Arc;

use shared_types::ClassificationMessage;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::stats::ChannelStats;

/// Why a message did not enter the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Every slot holds an unread message.
    Full,
    /// The consumer is gone.
    Closed,
}

/// Result of a non-blocking publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The message is queued for the consumer.
    Delivered,
    /// The message was discarded.
    Dropped(DropReason),
}

impl PublishOutcome {
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Sending half of the classification channel.
///
/// Cloneable, although the guard runs a single producer.
#[derive(Clone)]
pub struct ClassificationPublisher {
    sender: mpsc::Sender<ClassificationMessage>,
    stats: Arc<ChannelStats>,
    capacity: usize,
}

impl ClassificationPublisher {
    pub(crate) fn new(
        sender: mpsc::Sender<ClassificationMessage>,
        stats: Arc<ChannelStats>,
        capacity: usize,
    ) -> Self {
        Self {
            sender,
            stats,
            capacity,
        }
    }

    /// Queue `message` without waiting.
    ///
    /// A full or closed channel drops the message; the caller is told why but
    /// is expected to carry on.
    pub fn publish(&self, message: ClassificationMessage) -> PublishOutcome {
        match self.sender.try_send(message) {
            Ok(()) => {
                self.stats.record_published();
                PublishOutcome::Delivered
            }
            Err(TrySendError::Full(message)) => {
                self.stats.record_dropped();
                debug!(
                    identifier = %message.identifier,
                    sequence = message.sequence,
                    capacity = self.capacity,
                    "Classification dropped (channel full)"
                );
                PublishOutcome::Dropped(DropReason::Full)
            }
            Err(TrySendError::Closed(message)) => {
                self.stats.record_dropped();
                warn!(
                    identifier = %message.identifier,
                    sequence = message.sequence,
                    "Classification dropped (consumer closed)"
                );
                PublishOutcome::Dropped(DropReason::Closed)
            }
        }
    }

    /// Channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots right now.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.sender.capacity()
    }

    #[must_use]
    pub fn stats(&self) -> Arc<ChannelStats> {
        Arc::clone(&self.stats)
    }
}
