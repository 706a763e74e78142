//! Suite-run harness
//!
//! Builds a [`SuiteRunner`] from in-memory feature sources, executes it with
//! result persistence into a temporary directory, and collects the written
//! records back into a [`ReportSnapshot`].

use std::collections::HashMap;
use thiserror::Error;
use verslag_engine::{BindingModule, EngineError, ResultWriter, SuiteRunner, TestResult};
use walkdir::WalkDir;

/// Errors the harness itself can produce.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Engine-side failure (load, parse, bind, run)
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// IO failure while managing the results directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A written result record could not be read back
    #[error("Result record error: {0}")]
    Record(#[from] serde_json::Error),

    /// Results-directory traversal failure
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The collected report of one harness run, keyed by full case name.
#[derive(Debug, Default)]
pub struct ReportSnapshot {
    cases: HashMap<String, TestResult>,
}

impl ReportSnapshot {
    /// Look up a case by its full name (`"sample.feature:Bar"`).
    pub fn test_case(&self, full_name: &str) -> Option<&TestResult> {
        self.cases.get(full_name)
    }

    /// Number of collected cases.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// All case keys, sorted for stable diagnostics.
    pub fn full_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cases.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Drives complete suite runs for acceptance tests.
///
/// Every [`run`] call uses a fresh temporary results directory, so runs
/// cannot observe each other's records.
///
/// [`run`]: HarnessRunner::run
#[derive(Debug, Default)]
pub struct HarnessRunner;

impl HarnessRunner {
    /// Create a harness runner.
    pub fn new() -> Self {
        Self
    }

    /// Run the given feature sources against the binding module and collect
    /// the written report.
    ///
    /// # Arguments
    ///
    /// * `features` - `(source name, document body)` pairs
    /// * `module` - The binding module under test
    ///
    /// # Errors
    ///
    /// Returns a [`HarnessError`] if the features fail to parse, a binding
    /// cannot be resolved, or the written records cannot be read back.
    /// Scenario-level failures do not error; they appear in the snapshot as
    /// failed or broken cases.
    pub fn run(
        &self,
        features: &[(&str, &str)],
        module: BindingModule,
    ) -> Result<ReportSnapshot, HarnessError> {
        let results_dir = tempfile::tempdir()?;

        let mut runner = SuiteRunner::new();
        for (source, content) in features {
            runner.add_feature_str(*source, *content)?;
        }
        runner.register_module(module);

        let writer = ResultWriter::new(results_dir.path());
        let report = runner.run_and_write(&writer)?;
        tracing::debug!(cases = report.len(), "Harness run complete");

        Self::collect(results_dir.path())
    }

    /// Read every `*-result.json` under the directory into a snapshot.
    fn collect(results_dir: &std::path::Path) -> Result<ReportSnapshot, HarnessError> {
        let mut cases = HashMap::new();

        for entry in WalkDir::new(results_dir) {
            let entry = entry?;
            let path = entry.path();
            let is_result = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("-result.json"));
            if !is_result {
                continue;
            }

            let content = std::fs::read_to_string(path)?;
            let result: TestResult = serde_json::from_str(&content)?;
            cases.insert(result.full_name.clone(), result);
        }

        Ok(ReportSnapshot { cases })
    }
}
