//! verslag Harness
//!
//! End-to-end test harness for the verslag engine. The harness drives a
//! complete suite run from in-memory feature sources and a binding module,
//! persists the result records into a throwaway results directory, reads
//! them back, and hands the collected report to matcher utilities.
//!
//! Going through the filesystem on purpose: acceptance tests exercise the
//! same wire format report tooling consumes, not the engine's in-memory
//! structures.
//!
//! # Example
//!
//! ```
//! use verslag_harness::{matchers, HarnessRunner};
//! use verslag_engine::{BindingModule, ScenarioBinding};
//!
//! let runner = HarnessRunner::new();
//! let snapshot = runner
//!     .run(
//!         &[(
//!             "sample.feature",
//!             "Feature: Foo\n    Scenario: Bar\n        Given noop\n",
//!         )],
//!         BindingModule::builder("steps")
//!             .step("noop", |_| Ok(()))
//!             .scenario(
//!                 ScenarioBinding::new("sample.feature", "Bar")
//!                     .with_description("Lorem Ipsum"),
//!             )
//!             .build(),
//!     )
//!     .unwrap();
//!
//! let case = matchers::has_test_case(&snapshot, "sample.feature:Bar");
//! matchers::assert_description(case, "Lorem Ipsum");
//! ```

pub mod matchers;
mod runner;

pub use runner::{HarnessError, HarnessRunner, ReportSnapshot};

use verslag_engine::DIALECT_VERSION;

/// Whether the compiled Gherkin dialect predates the given major version.
///
/// Used to skip acceptance tests that need a newer dialect, e.g. scenario
/// level descriptions:
///
/// ```
/// if verslag_harness::dialect_before(7) {
///     // skip: scenario-level descriptions unavailable
/// }
/// ```
pub fn dialect_before(major: u32) -> bool {
    DIALECT_VERSION.is_before(major)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_gate_matches_compiled_version() {
        assert_eq!(dialect_before(7), DIALECT_VERSION.major < 7);
        assert!(dialect_before(u32::MAX));
    }
}
