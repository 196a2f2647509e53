//! # Policy Subsystem
//!
//! **Component ID:** SG-05
//!
//! ## Purpose
//!
//! Owns the Permissive/Strict switch. The control loop samples the toggle
//! input every poll interval; each press flips the mode and rebuilds the
//! whitelist before the next sample is taken.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | One press, one toggle | `domain/edge.rs` - Released → Pressed only |
//! | INVARIANT-2 | Mode never runs ahead of content | mode is read back from the store, never cached here |
//! | INVARIANT-3 | Rebuild failure is bounded | `service.rs` - at most `rebuild_attempts` tries |
//!
//! The controller is not a supervised worker: it runs on the control loop
//! and does not pulse the watchdog.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::PolicyConfig;
pub use domain::{EdgeDetector, InputLevel, PolicyError};
pub use ports::PolicyInput;
pub use service::PolicyController;

/// Component name used in log events.
pub const COMPONENT: &str = "sg-05-policy";
