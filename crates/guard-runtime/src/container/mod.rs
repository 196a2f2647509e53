//! # Component Container
//!
//! Builds every component from one [`GuardConfig`] and a set of ports.
//!
//! - The whitelist is populated for the initial mode before any worker exists
//! - Workers receive the watchdog as their `Heartbeat`
//! - The monitor and the alert handler share one bounded channel

pub mod components;
pub mod config;

pub use components::{ContainerError, GuardContainer};
pub use config::{ConfigError, GuardConfig};
