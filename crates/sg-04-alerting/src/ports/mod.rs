//! Ports for the alert handler.

pub mod outbound;

pub use outbound::AlertIndicator;
