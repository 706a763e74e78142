//! Test-case identity
//!
//! Test cases are addressed as `"<feature-file>:<scenario-name>"`
//! (`sample.feature:Bar`). [`CaseId`] parses and formats that form, and
//! [`history_id`] derives a stable per-case identity for matching results
//! across runs.
//!
//! # Examples
//!
//! ```
//! use verslag_engine::ident::CaseId;
//!
//! let id = CaseId::parse("sample.feature:Bar").unwrap();
//! assert_eq!(id.feature(), "sample.feature");
//! assert_eq!(id.scenario(), "Bar");
//! assert_eq!(id.to_string(), "sample.feature:Bar");
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a test case: the owning feature file plus the scenario name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId {
    /// Feature file source name (e.g. `sample.feature`)
    feature: String,
    /// Scenario name within the feature file
    scenario: String,
}

impl CaseId {
    /// Create a case id from its components.
    pub fn new(feature: impl Into<String>, scenario: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            scenario: scenario.into(),
        }
    }

    /// Parse a `"<feature-file>:<scenario>"` key.
    ///
    /// The split happens at the first `:`; scenario names may contain
    /// colons, feature file names may not.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCaseId` if either side is empty or the
    /// separator is missing.
    pub fn parse(key: &str) -> Result<Self> {
        let (feature, scenario) = key
            .split_once(':')
            .ok_or_else(|| EngineError::InvalidCaseId(format!("missing ':' in '{}'", key)))?;

        if feature.is_empty() {
            return Err(EngineError::InvalidCaseId(format!(
                "empty feature file in '{}'",
                key
            )));
        }
        if scenario.is_empty() {
            return Err(EngineError::InvalidCaseId(format!(
                "empty scenario name in '{}'",
                key
            )));
        }

        Ok(Self::new(feature, scenario))
    }

    /// Feature file source name.
    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Scenario name.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// The full report key (`"<feature-file>:<scenario>"`).
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.feature, self.scenario)
    }
}

/// Stable per-case identity: lowercase hex SHA-256 of the full name.
///
/// Result records carry this so report tooling can correlate the same case
/// across runs regardless of execution order.
pub fn history_id(full_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(full_name.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let id = CaseId::parse("sample.feature:Bar").unwrap();
        assert_eq!(id.feature(), "sample.feature");
        assert_eq!(id.scenario(), "Bar");
    }

    #[test]
    fn test_scenario_names_may_contain_colons() {
        let id = CaseId::parse("sample.feature:Bar: the sequel").unwrap();
        assert_eq!(id.feature(), "sample.feature");
        assert_eq!(id.scenario(), "Bar: the sequel");
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!(CaseId::parse("no-separator").is_err());
        assert!(CaseId::parse(":Bar").is_err());
        assert!(CaseId::parse("sample.feature:").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let id = CaseId::new("sample.feature", "Bar");
        assert_eq!(CaseId::parse(&id.to_string()).unwrap(), id);
        assert_eq!(id.full_name(), "sample.feature:Bar");
    }

    #[test]
    fn test_history_id_is_stable_hex() {
        let a = history_id("sample.feature:Bar");
        let b = history_id("sample.feature:Bar");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_history_id_differs_per_case() {
        assert_ne!(
            history_id("sample.feature:Bar"),
            history_id("sample.feature:Baz")
        );
    }
}
