//! # Network Monitor Subsystem
//!
//! **Component ID:** SG-03
//!
//! ## Purpose
//!
//! Producer side of the classification channel. Every sample period the
//! monitor reads the link, classifies the active network against the
//! whitelist and publishes the verdict without ever blocking on the channel.
//!
//! ## Loop
//!
//! ```text
//! link up?  ── no ──→  "<disconnected>", authorized = false ─┐
//!    │ yes                                                  │
//!    ▼                                                      ▼
//! classify(id) (fail-closed) ───────────────→ publish (drop if full)
//!                                                           │
//!                                                           ▼
//!                                                 pulse, sleep 1.5 s
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod service;

pub use config::{MonitorConfig, DEFAULT_SAMPLE_PERIOD};
pub use service::NetworkMonitor;

/// Component name used in log events.
pub const COMPONENT: &str = "sg-03-monitor";
