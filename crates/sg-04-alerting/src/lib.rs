//! # Alerting Subsystem
//!
//! **Component ID:** SG-04
//!
//! ## Purpose
//!
//! Consumer side of the classification channel. Authorized networks produce
//! an `OK` status line; anything else produces an `ALERT` line followed by a
//! fixed blink pattern on the indicator.
//!
//! ## Behaviour
//!
//! | Input | Log | Indicator |
//! |-------|-----|-----------|
//! | `authorized = true` | `INFO` "OK" | untouched |
//! | `authorized = false` | `ALERT` "Unauthorized network" | 3 on/off cycles, 150 ms per phase |
//! | nothing within 2 s | none | untouched |
//! | channel closed | `ERROR`, handler returns | untouched |
//!
//! The blink runs inline: no message is received while it is in progress.
//! The watchdog is pulsed after every receive attempt.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod ports;
pub mod service;

pub use config::AlertConfig;
pub use ports::AlertIndicator;
pub use service::{AlertHandler, AlertOutcome};

/// Component name used in log events.
pub const COMPONENT: &str = "sg-04-alerting";
