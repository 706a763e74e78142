//! Gherkin dialect versioning
//!
//! The engine implements a versioned subset of the Gherkin dialect. Some
//! parser capabilities only exist from a certain dialect version on;
//! currently that is scenario-level free-text descriptions, introduced in
//! dialect 7. Test suites use [`Version::is_before`] to skip cases that
//! exercise capabilities the compiled dialect does not have.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The Gherkin dialect version this engine implements.
pub const DIALECT_VERSION: Version = Version::new(7, 2, 0);

/// Dialect version that introduced scenario-level descriptions.
///
/// Before this version the parser discards free text between a scenario
/// header and its first step.
pub const SCENARIO_DESCRIPTIONS_SINCE: Version = Version::new(7, 0, 0);

/// A semantic dialect version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a `major.minor.patch` string. Minor and patch may be omitted.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidVersion` if any component is not a
    /// non-negative integer or more than three components are present.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = [0u32; 3];
        let mut count = 0;

        for component in s.split('.') {
            if count >= 3 {
                return Err(EngineError::InvalidVersion(format!(
                    "too many components in '{}'",
                    s
                )));
            }
            parts[count] = component
                .parse::<u32>()
                .map_err(|_| EngineError::InvalidVersion(format!("'{}'", s)))?;
            count += 1;
        }

        if count == 0 {
            return Err(EngineError::InvalidVersion("empty version string".to_string()));
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Whether this version predates the given major version.
    ///
    /// Used by test harnesses to skip cases that need a newer dialect.
    pub const fn is_before(self, major: u32) -> bool {
        self.major < major
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
