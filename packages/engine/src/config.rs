//! Configuration for the verslag engine
//!
//! Two kinds of configuration live here:
//!
//! - Compile-time limits that bound what the feature-file parser accepts.
//!   These prevent pathological documents (huge files, thousands of
//!   scenarios) from exhausting memory during a test run.
//! - [`ReportConfig`], the runtime configuration for result output, loadable
//!   from a `verslag.yaml` file.

use crate::error::{EngineError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum feature document size in bytes (1 MB).
///
/// Feature files are hand-written test documents; typical files are a few
/// kilobytes. 1 MB is far beyond any legitimate document.
pub const MAX_FEATURE_SIZE: usize = 1_000_000;

/// Maximum number of scenarios in a single feature file.
pub const MAX_SCENARIOS_PER_FEATURE: usize = 1_000;

/// Maximum number of steps in a single scenario.
pub const MAX_STEPS_PER_SCENARIO: usize = 500;

/// Maximum size of a resolved description in bytes.
///
/// Bounds what a runaway dynamic-description call can push into a result
/// record.
pub const MAX_DESCRIPTION_SIZE: usize = 100_000;

/// Default directory for result records, relative to the working directory.
pub const DEFAULT_RESULTS_DIR: &str = "verslag-results";

/// Runtime configuration for report output.
///
/// Loaded from a `verslag.yaml` file:
///
/// ```yaml
/// results_dir: target/verslag-results
/// clean_results: true
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory that receives one `<uuid>-result.json` file per test case
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Whether to wipe the results directory before a run
    #[serde(default = "default_clean_results")]
    pub clean_results: bool,
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESULTS_DIR)
}

fn default_clean_results() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            clean_results: default_clean_results(),
        }
    }
}

impl ReportConfig {
    /// Parse a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::YamlError` if the YAML is invalid.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(EngineError::YamlError)?;
        tracing::debug!(results_dir = %config.results_dir.display(), "Parsed report configuration");
        Ok(config)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::LoadError` if the file cannot be read.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!(path = %path_ref.display(), "Loading report configuration");

        let content = fs::read_to_string(path_ref)
            .map_err(|_| EngineError::LoadError("Failed to read configuration file".to_string()))?;
        Self::from_yaml_str(&content)
    }
}
