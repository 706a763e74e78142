//! Error types for the verslag engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to load a feature file or configuration
    #[error("Failed to load: {0}")]
    LoadError(String),

    /// Gherkin parse error with source line number
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// YAML parsing error (report configuration)
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error (result records)
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// No feature file with the given source name is loaded
    #[error("Feature file not found: {0}")]
    FeatureNotFound(String),

    /// The named scenario does not exist in the feature file
    #[error("Scenario not found: {feature}:{scenario}")]
    ScenarioNotFound { feature: String, scenario: String },

    /// No step definition matches the step text
    #[error("No step definition bound for step: {0}")]
    StepNotBound(String),

    /// Two bindings target the same test case
    #[error("Duplicate binding for test case: {0}")]
    DuplicateBinding(String),

    /// A step handler or scenario body signalled failure
    #[error("Step failed: {0}")]
    StepFailed(String),

    /// Malformed test-case identifier
    #[error("Invalid case id: {0}")]
    InvalidCaseId(String),

    /// Malformed dialect version string
    #[error("Invalid version: {0}")]
    InvalidVersion(String),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
