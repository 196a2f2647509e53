//! # Connection Supervisor
//!
//! **Component ID:** SG-02
//!
//! ## Purpose
//!
//! Keeps the device associated with a network. When the link is down it
//! issues a disconnect-then-reconnect cycle and checks again after a fixed
//! retry interval; when the link is up it idles. There is no backoff and no
//! error is surfaced upward: the supervised medium is assumed low-churn.
//!
//! ```text
//!            ┌───────────────┐
//!     ┌────→ │ is_connected? │ ──yes──→ sleep(idle 3s) ──┐
//!     │      └───────────────┘                            │
//!     │              │ no                                 │
//!     │              ▼                                    │
//!     │  disconnect → sleep(200ms) → reconnect            │
//!     │              │                                    │
//!     │              ▼                                    │
//!     │       sleep(retry 2s)                             │
//!     │              │                                    │
//!     └──── pulse ←──┴────────────────────────────────────┘
//! ```
//!
//! The current link state is exposed read-only through [`LinkStatus`].

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod ports;
pub mod service;

pub use config::{Credentials, SupervisorConfig};
pub use ports::NetworkStatusProvider;
pub use service::{ConnectionSupervisor, LinkCheck, LinkStatus};

/// Component name used in log events.
pub const COMPONENT: &str = "sg-02-connection";
