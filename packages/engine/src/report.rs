//! Structured test report records
//!
//! Every executed scenario produces one [`TestResult`] record. Records are
//! serialized as JSON, one `<uuid>-result.json` file per case, so report
//! tooling can pick them up independently of the process that produced them.
//! Field names follow the camelCase wire format
//! (`fullName`, `historyId`, `descriptionHtml`, ...).
//!
//! [`RunReport`] is the in-memory collection a suite run returns, keyed by
//! the case's full name (`"<feature-file>:<scenario>"`).

use crate::config::ReportConfig;
use crate::error::{EngineError, Result};
use crate::ident::CaseId;
use crate::types::{Label, Status};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current time as epoch milliseconds.
pub(crate) fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Failure details attached to a non-passing result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetails {
    /// Human-readable failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional technical trace (e.g. the failing step chain)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl StatusDetails {
    /// Details carrying only a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            trace: None,
        }
    }
}

/// Record of one executed (or skipped) step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Keyword-prefixed display name (`"Given noop"`)
    pub name: String,
    pub status: Status,
    /// Start time, epoch milliseconds
    pub start: i64,
    /// Stop time, epoch milliseconds
    pub stop: i64,
}

/// One test case in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Unique id of this record (also the result file name stem)
    pub uuid: String,
    /// Stable per-case identity across runs (see [`crate::ident::history_id`])
    pub history_id: String,
    /// Scenario name
    pub name: String,
    /// Report key: `"<feature-file>:<scenario>"`
    pub full_name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_details: Option<StatusDetails>,
    /// Resolved plain-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolved HTML description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    /// Start time, epoch milliseconds
    pub start: i64,
    /// Stop time, epoch milliseconds
    pub stop: i64,
}

impl TestResult {
    /// The case identity this record belongs to.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCaseId` if the record's full name is
    /// malformed (possible for records read from disk).
    pub fn case_id(&self) -> Result<CaseId> {
        CaseId::parse(&self.full_name)
    }

    /// Whether the case passed.
    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Writes result records into a results directory.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    results_dir: PathBuf,
}

impl ResultWriter {
    /// Create a writer targeting the given directory.
    ///
    /// The directory is created on the first write; call [`prepare`] to
    /// create (and optionally clean) it eagerly.
    ///
    /// [`prepare`]: ResultWriter::prepare
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Create a writer from a report configuration, preparing the directory
    /// according to its `clean_results` setting.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::IoError` if the directory cannot be created or
    /// cleaned.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let writer = Self::new(config.results_dir.clone());
        if config.clean_results {
            writer.clean()?;
        }
        writer.prepare()?;
        Ok(writer)
    }

    /// The target directory.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Create the results directory if it does not exist.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.results_dir)?;
        Ok(())
    }

    /// Remove previously written result records from the directory.
    ///
    /// Only `*-result.json` files are removed; anything else in the
    /// directory is left alone.
    pub fn clean(&self) -> Result<()> {
        if !self.results_dir.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.results_dir)? {
            let path = entry?.path();
            let is_result = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("-result.json"));
            if is_result {
                fs::remove_file(&path)?;
            }
        }
        tracing::debug!(dir = %self.results_dir.display(), "Cleaned results directory");
        Ok(())
    }

    /// Write one result record as `<uuid>-result.json`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::JsonError` on serialization failure or
    /// `EngineError::IoError` on write failure.
    pub fn write(&self, result: &TestResult) -> Result<PathBuf> {
        self.prepare()?;
        let path = self.results_dir.join(format!("{}-result.json", result.uuid));
        let json = serde_json::to_string_pretty(result).map_err(EngineError::JsonError)?;
        fs::write(&path, json)?;
        tracing::debug!(case = %result.full_name, path = %path.display(), "Wrote result record");
        Ok(path)
    }
}

/// In-memory report of one suite run.
#[derive(Debug, Default)]
pub struct RunReport {
    results: Vec<TestResult>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Look up a case by its full name (`"sample.feature:Bar"`).
    pub fn test_case(&self, full_name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.full_name == full_name)
    }

    /// Look up a case by identity.
    pub fn case(&self, id: &CaseId) -> Option<&TestResult> {
        self.test_case(&id.full_name())
    }

    /// Whether a case with the given full name exists.
    pub fn contains(&self, full_name: &str) -> bool {
        self.test_case(full_name).is_some()
    }

    /// Number of cases.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report is empty.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate the results in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter()
    }

    /// Write every result through the given writer.
    pub fn write_all(&self, writer: &ResultWriter) -> Result<()> {
        for result in &self.results {
            writer.write(result)?;
        }
        Ok(())
    }
}
