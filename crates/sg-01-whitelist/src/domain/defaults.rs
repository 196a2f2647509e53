//! The fixed identifier set every rebuild starts from.

use shared_types::{NetworkId, PolicyMode};

use super::errors::WhitelistError;

/// Identifiers authorized in permissive mode.
pub const DEFAULT_IDENTIFIERS: [&str; 5] = [
    "Wokwi-GUEST",
    "CorpNet-5G",
    "CorpNet-2G",
    "Guest-VLAN-10",
    "Lab-SSID",
];

/// Identifier removed in strict mode, so associating with it raises an alert.
pub const STRICT_SENTINEL: &str = "Wokwi-GUEST";

/// Minimum size of a default set.
pub const MIN_DEFAULT_IDENTIFIERS: usize = 5;

/// Immutable default set plus its strict-mode sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultWhitelist {
    identifiers: Vec<NetworkId>,
    sentinel: NetworkId,
}

impl DefaultWhitelist {
    /// Build a custom default set.
    ///
    /// # Errors
    ///
    /// - `TooFewDefaults` if fewer than five identifiers are given
    /// - `SentinelMissing` if `sentinel` is not among them
    pub fn new<I, S>(identifiers: I, sentinel: &str) -> Result<Self, WhitelistError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let identifiers: Vec<NetworkId> = identifiers.into_iter().map(NetworkId::new).collect();
        if identifiers.len() < MIN_DEFAULT_IDENTIFIERS {
            return Err(WhitelistError::TooFewDefaults {
                minimum: MIN_DEFAULT_IDENTIFIERS,
                actual: identifiers.len(),
            });
        }

        let sentinel = NetworkId::new(sentinel);
        if !identifiers.contains(&sentinel) {
            return Err(WhitelistError::SentinelMissing(sentinel.to_string()));
        }

        Ok(Self {
            identifiers,
            sentinel,
        })
    }

    /// Identifiers authorized under `mode`, in default order.
    pub fn for_mode(&self, mode: PolicyMode) -> impl Iterator<Item = &NetworkId> + '_ {
        self.identifiers
            .iter()
            .filter(move |id| !(mode.is_strict() && **id == self.sentinel))
    }

    #[must_use]
    pub fn sentinel(&self) -> &NetworkId {
        &self.sentinel
    }

    #[must_use]
    pub fn identifiers(&self) -> &[NetworkId] {
        &self.identifiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl Default for DefaultWhitelist {
    fn default() -> Self {
        Self {
            identifiers: DEFAULT_IDENTIFIERS.iter().map(|s| NetworkId::new(s)).collect(),
            sentinel: NetworkId::new(STRICT_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_contains_sentinel() {
        let defaults = DefaultWhitelist::default();
        assert_eq!(defaults.len(), 5);
        assert!(defaults.identifiers().contains(defaults.sentinel()));
    }

    #[test]
    fn test_strict_skips_only_sentinel() {
        let defaults = DefaultWhitelist::default();
        let strict: Vec<&str> = defaults
            .for_mode(PolicyMode::Strict)
            .map(NetworkId::as_str)
            .collect();
        assert_eq!(
            strict,
            vec!["CorpNet-5G", "CorpNet-2G", "Guest-VLAN-10", "Lab-SSID"]
        );
        assert_eq!(defaults.for_mode(PolicyMode::Permissive).count(), 5);
    }

    #[test]
    fn test_strict_skips_every_sentinel_duplicate() {
        let defaults = DefaultWhitelist::new(["A", "B", "C", "D", "A", "E"], "A").unwrap();
        assert_eq!(defaults.for_mode(PolicyMode::Strict).count(), 4);
    }

    #[test]
    fn test_rejects_small_set() {
        let err = DefaultWhitelist::new(["A", "B", "C"], "A").unwrap_err();
        assert_eq!(
            err,
            WhitelistError::TooFewDefaults {
                minimum: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn test_rejects_missing_sentinel() {
        let err = DefaultWhitelist::new(["A", "B", "C", "D", "E"], "Z").unwrap_err();
        assert!(matches!(err, WhitelistError::SentinelMissing(_)));
    }
}
