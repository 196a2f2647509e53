//! Whitelist error types.

use std::time::Duration;

use thiserror::Error;

/// Errors from whitelist operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WhitelistError {
    /// The store mutex was not acquired within the bound.
    #[error("Whitelist lock not acquired within {waited:?} ({operation})")]
    LockTimeout {
        operation: &'static str,
        waited: Duration,
    },

    /// The default set has fewer entries than required.
    #[error("Default whitelist needs at least {minimum} identifiers, got {actual}")]
    TooFewDefaults { minimum: usize, actual: usize },

    /// The strict-mode sentinel is not part of the default set.
    #[error("Strict sentinel '{0}' is not in the default whitelist")]
    SentinelMissing(String),
}
