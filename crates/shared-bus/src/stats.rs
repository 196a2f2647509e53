//! # Channel Statistics
//!
//! Lock-free counters shared by both ends of the classification channel.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one classification channel.
#[derive(Debug, Default)]
pub struct ChannelStats {
    published: AtomicU64,
    dropped: AtomicU64,
    received: AtomicU64,
}

impl ChannelStats {
    pub(crate) fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// Messages accepted into the channel.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Messages discarded because the channel was full or closed.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Messages taken out by the consumer.
    #[must_use]
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    /// Messages accepted but not yet consumed.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.published().saturating_sub(self.received())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_tracks_difference() {
        let stats = ChannelStats::default();
        stats.record_published();
        stats.record_published();
        stats.record_received();
        stats.record_dropped();

        assert_eq!(stats.published(), 2);
        assert_eq!(stats.received(), 1);
        assert_eq!(stats.dropped(), 1);
        assert_eq!(stats.in_flight(), 1);
    }
}
