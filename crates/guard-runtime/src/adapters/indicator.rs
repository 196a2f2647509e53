//! Indicator that reports through the log instead of a GPIO pin.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use sg_04_alerting::AlertIndicator;
use tracing::debug;

#[derive(Debug, Default)]
pub struct LogIndicator {
    lit: AtomicBool,
    on_phases: AtomicU64,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of off → on transitions so far.
    #[must_use]
    pub fn on_phases(&self) -> u64 {
        self.on_phases.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }
}

impl AlertIndicator for LogIndicator {
    fn set_indicator(&self, on: bool) {
        let was = self.lit.swap(on, Ordering::SeqCst);
        if was == on {
            return;
        }
        if on {
            self.on_phases.fetch_add(1, Ordering::SeqCst);
        }
        debug!(on, "Indicator");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_only_transitions_to_on() {
        let indicator = LogIndicator::new();
        indicator.set_indicator(true);
        indicator.set_indicator(true);
        indicator.set_indicator(false);
        indicator.set_indicator(true);

        assert_eq!(indicator.on_phases(), 2);
        assert!(indicator.is_lit());
    }
}
