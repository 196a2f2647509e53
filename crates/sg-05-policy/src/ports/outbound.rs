//! # Outbound Ports
//!
//! The toggle input is sampled, not interrupt driven: the controller reads
//! the current level on every poll and detects edges itself.

use crate::domain::InputLevel;

/// A momentary two-level input (a push button on hardware).
pub trait PolicyInput: Send + Sync {
    /// Current level. Must not block.
    fn read_level(&self) -> InputLevel;
}
