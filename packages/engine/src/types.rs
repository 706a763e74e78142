//! Core types for the verslag engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a test case or an individual step.
///
/// Serialized lowercase to match the report wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every step and the scenario body completed without error
    Passed,
    /// A step handler or the scenario body returned an error
    Failed,
    /// The case could not be executed meaningfully (e.g. unbound step)
    Broken,
    /// The step was not executed because an earlier step did not pass
    Skipped,
}

impl Status {
    /// Check whether this status counts as a successful outcome.
    pub fn is_ok(self) -> bool {
        matches!(self, Status::Passed)
    }

    /// Severity rank used when combining step outcomes into a case outcome.
    ///
    /// `Broken` outranks `Failed`: a case that could not run at all is
    /// reported as broken even if a later step would have failed.
    fn severity(self) -> u8 {
        match self {
            Status::Passed => 0,
            Status::Skipped => 1,
            Status::Failed => 2,
            Status::Broken => 3,
        }
    }

    /// Combine two statuses, keeping the more severe one.
    pub fn combine(self, other: Status) -> Status {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Broken => "broken",
            Status::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Keyword introducing a Gherkin step line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    /// Continuation keyword; may not open a scenario
    And,
    /// Negated continuation keyword; behaves like `And` for parsing purposes
    But,
}

impl StepKeyword {
    /// Recognize a step keyword at the start of a line.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "Given" => Some(StepKeyword::Given),
            "When" => Some(StepKeyword::When),
            "Then" => Some(StepKeyword::Then),
            "And" => Some(StepKeyword::And),
            "But" => Some(StepKeyword::But),
            _ => None,
        }
    }

    /// Whether this keyword continues the previous step's keyword.
    pub fn is_conjunction(self) -> bool {
        matches!(self, StepKeyword::And | StepKeyword::But)
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        };
        write!(f, "{}", s)
    }
}

/// A name/value label attached to a test result.
///
/// Labels carry report taxonomy: the owning feature, the suite, and any
/// scenario tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    /// Create a new label.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Label carrying the feature name of the owning feature file.
    pub fn feature(value: impl Into<String>) -> Self {
        Self::new("feature", value)
    }

    /// Label carrying the suite (feature file) a case belongs to.
    pub fn suite(value: impl Into<String>) -> Self {
        Self::new("suite", value)
    }

    /// Label carrying a scenario tag.
    pub fn tag(value: impl Into<String>) -> Self {
        Self::new("tag", value)
    }
}
