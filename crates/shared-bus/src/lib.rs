//! # Shared Bus - Bounded Classification Channel
//!
//! The only cross-worker data path in the guard: the network monitor
//! publishes `ClassificationMessage`s, the alert handler drains them.
//!
//! ## Rules
//!
//! - **Never block the producer:** `publish` is a `try_send`; a full channel
//!   drops the message and reports `PublishOutcome::Dropped`.
//! - **Never wait forever on the consumer side:** `recv_timeout` is always
//!   bounded so the consumer keeps pulsing the watchdog on a quiet channel.
//! - **FIFO, at most once:** messages arrive in publish order; dropped
//!   messages are never redelivered.
//!
//! ```text
//! ┌──────────────┐  publish()   ┌──────────────────┐  recv_timeout()  ┌──────────────┐
//! │ NetworkMonitor│ ──────────→ │ mpsc (capacity 8) │ ───────────────→ │ AlertHandler │
//! └──────────────┘  (try_send)  └──────────────────┘                  └──────────────┘
//!                                       │ full
//!                                       ▼
//!                                    dropped
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod publisher;
pub mod stats;
pub mod subscriber;

use std::sync::Arc;

use tokio::sync::mpsc;

pub use publisher::{ClassificationPublisher, DropReason, PublishOutcome};
pub use stats::ChannelStats;
pub use subscriber::{ClassificationSubscription, SubscriptionError};

/// Default number of unread classifications the channel holds.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Create a bounded classification channel.
///
/// A capacity of zero is raised to one; tokio channels cannot be unbuffered.
#[must_use]
pub fn classification_channel(
    capacity: usize,
) -> (ClassificationPublisher, ClassificationSubscription) {
    let capacity = capacity.max(1);
    let (sender, receiver) = mpsc::channel(capacity);
    let stats = Arc::new(ChannelStats::default());
    (
        ClassificationPublisher::new(sender, Arc::clone(&stats), capacity),
        ClassificationSubscription::new(receiver, stats),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(DEFAULT_CHANNEL_CAPACITY, 8);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (publisher, _sub) = classification_channel(0);
        assert_eq!(publisher.capacity(), 1);
    }
}
