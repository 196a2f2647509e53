//! Policy errors.

use shared_types::PolicyMode;
use sg_01_whitelist::WhitelistError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Every rebuild attempt failed; the previous mode is still in force.
    #[error("Failed to apply {mode} policy after {attempts} attempts: {source}")]
    RebuildFailed {
        mode: PolicyMode,
        attempts: u32,
        #[source]
        source: WhitelistError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_display_names_mode_and_attempts() {
        let err = PolicyError::RebuildFailed {
            mode: PolicyMode::Strict,
            attempts: 3,
            source: WhitelistError::LockTimeout {
                operation: "rebuild",
                waited: Duration::from_millis(200),
            },
        };
        let text = err.to_string();
        assert!(text.contains("strict"));
        assert!(text.contains("3 attempts"));
    }
}
