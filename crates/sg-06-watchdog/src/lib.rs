//! # Watchdog Subsystem
//!
//! **Component ID:** SG-06
//!
//! ## Purpose
//!
//! Process-wide liveness supervision. Every long-running worker registers
//! once and pulses at least once per window. A monitor task checks the pulse
//! table every second.
//!
//! ## Trip Rules
//!
//! | Condition | `fatal_on_timeout` | Result |
//! |-----------|--------------------|--------|
//! | all registered workers pulsed within `timeout` | any | healthy |
//! | some worker overdue | `true` | reset handler fires once, monitor stops |
//! | some worker overdue | `false` | overdue workers logged, monitoring continues |
//! | pulse from an unregistered worker | any | ignored |
//!
//! The pulse table sits behind a `parking_lot` mutex that is never held
//! across an await.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod reset;
pub mod service;

pub use config::{WatchdogConfig, DEFAULT_WATCHDOG_TIMEOUT};
pub use reset::{ProcessRestart, ResetHandler, RESTART_EXIT_CODE};
pub use service::{Watchdog, WatchdogVerdict};

/// Component name used in log events.
pub const COMPONENT: &str = "sg-06-watchdog";
