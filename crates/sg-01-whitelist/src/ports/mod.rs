//! Ports layer for the whitelist.
//!
//! - Inbound (Driving) ports: API used by the monitor and policy controller

pub mod inbound;

pub use inbound::*;
