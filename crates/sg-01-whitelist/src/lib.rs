//! # Whitelist Subsystem
//!
//! **Component ID:** SG-01
//!
//! ## Purpose
//!
//! Holds the set of network identifiers currently considered authorized and
//! answers "is this network allowed?" for the monitor.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Length never exceeds capacity (8) | `domain/store.rs` - `rebuild()` stops at capacity |
//! | INVARIANT-2 | Content and mode change together | `domain/store.rs` - one critical section in `rebuild()` |
//! | INVARIANT-3 | Fail-closed classification | `domain/store.rs` - lock timeout yields `false` |
//! | INVARIANT-4 | Every lock wait is bounded | `domain/store.rs` - `tokio::time::timeout` around `lock()` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - WhitelistApi trait (classify/rebuild/mode) │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implemented by ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/defaults.rs - DefaultWhitelist (fixed set + sentinel)   │
//! │  domain/store.rs    - WhitelistStore (mutex + atomic mirror)    │
//! │  domain/errors.rs   - WhitelistError                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;

pub use domain::{
    DefaultWhitelist, WhitelistConfig, WhitelistError, WhitelistStore, DEFAULT_IDENTIFIERS,
    DEFAULT_LOCK_WAIT, STRICT_SENTINEL, WHITELIST_CAPACITY,
};
pub use ports::WhitelistApi;

/// Component name used in log events.
pub const COMPONENT: &str = "sg-01-whitelist";
