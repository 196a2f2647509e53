//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `NetworkId`, the bounded network identifier
//! - **Policy**: `PolicyMode`
//! - **Messaging**: `ClassificationMessage`
//! - **Supervision**: `WorkerId`

use std::fmt;

/// Maximum number of characters kept in a network identifier.
pub const MAX_NETWORK_ID_LEN: usize = 32;

/// Identifier synthesized by the monitor when no network is associated.
pub const DISCONNECTED_ID: &str = "<disconnected>";

// =============================================================================
// IDENTITY
// =============================================================================

/// A network identifier (SSID) bounded to [`MAX_NETWORK_ID_LEN`] characters.
///
/// Construction never fails: input longer than the bound is truncated to its
/// first 32 characters. Comparison is exact on the stored (truncated) value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NetworkId(String);

impl NetworkId {
    /// Create a bounded identifier, truncating on a character boundary.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        match raw.char_indices().nth(MAX_NETWORK_ID_LEN) {
            Some((cut, _)) => Self(raw[..cut].to_string()),
            None => Self(raw.to_string()),
        }
    }

    /// The sentinel used when the link is down.
    pub fn disconnected() -> Self {
        Self(DISCONNECTED_ID.to_string())
    }

    /// True if this is the disconnected sentinel.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.0 == DISCONNECTED_ID
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (never exceeds [`MAX_NETWORK_ID_LEN`]).
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<&str> for NetworkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NetworkId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for NetworkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// POLICY
// =============================================================================

/// Authorization policy applied when the whitelist is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyMode {
    /// Full default set is authorized.
    #[default]
    Permissive,
    /// Default set minus the designated sentinel identifier.
    Strict,
}

impl PolicyMode {
    /// The opposite mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Permissive => Self::Strict,
            Self::Strict => Self::Permissive,
        }
    }

    #[must_use]
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => f.write_str("permissive"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

impl std::str::FromStr for PolicyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown policy mode: {other}")),
        }
    }
}

// =============================================================================
// MESSAGING
// =============================================================================

/// Outcome of classifying one network sample.
///
/// Produced by the network monitor, moved through the bounded channel and
/// consumed once by the alert handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationMessage {
    /// The sampled identifier (or the disconnected sentinel).
    pub identifier: NetworkId,
    /// Whether the identifier was found in the whitelist.
    pub authorized: bool,
    /// Producer-assigned sequence number, increasing per sample.
    pub sequence: u64,
}

impl ClassificationMessage {
    pub fn new(identifier: NetworkId, authorized: bool, sequence: u64) -> Self {
        Self {
            identifier,
            authorized,
            sequence,
        }
    }

    /// Message emitted when the link is down. Never authorized.
    pub fn disconnected(sequence: u64) -> Self {
        Self::new(NetworkId::disconnected(), false, sequence)
    }
}

// =============================================================================
// SUPERVISION
// =============================================================================

/// The long-running workers supervised by the watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerId {
    /// SG-02: keeps the network association alive.
    ConnectionSupervisor = 2,
    /// SG-03: samples and classifies the active network.
    NetworkMonitor = 3,
    /// SG-04: consumes classifications and raises alerts.
    AlertHandler = 4,
}

impl WorkerId {
    /// Component name used in log events and metric labels.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectionSupervisor => "sg-02-connection",
            Self::NetworkMonitor => "sg-03-monitor",
            Self::AlertHandler => "sg-04-alerting",
        }
    }

    /// Relative scheduling priority; higher runs first where the platform
    /// honours hints.
    #[must_use]
    pub fn priority_hint(&self) -> u8 {
        match self {
            Self::ConnectionSupervisor => 3,
            Self::NetworkMonitor => 4,
            Self::AlertHandler => 5,
        }
    }

    #[must_use]
    pub fn all() -> [WorkerId; 3] {
        [
            Self::ConnectionSupervisor,
            Self::NetworkMonitor,
            Self::AlertHandler,
        ]
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
