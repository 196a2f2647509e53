//! Ports layer for the connection supervisor.
//!
//! - Outbound (Driven) ports: the network stack the supervisor drives

pub mod outbound;

pub use outbound::*;
