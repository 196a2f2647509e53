//! # Shared Types Crate
//!
//! Domain entities and ports shared by every SSID Guard component.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Bounded Identifiers**: Network identifiers are never raw strings; the
//!   `NetworkId` type enforces the 32-character limit at construction.
//! - **Ports, not Globals**: Liveness reporting goes through the `Heartbeat`
//!   trait so workers never reach for process-wide state directly.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod entities;
pub mod liveness;

pub use entities::*;
pub use liveness::{Heartbeat, RecordingHeartbeat};
