//! # Outbound Ports
//!
//! The alert handler drives a single binary indicator (an LED on hardware,
//! a log line on the host).

/// A binary visual indicator.
pub trait AlertIndicator: Send + Sync {
    /// Switch the indicator on or off. Must not block.
    fn set_indicator(&self, on: bool);
}
