//! Feature-file loader
//!
//! Handles loading and parsing of Gherkin feature documents. The engine
//! implements a pragmatic subset of the dialect: a `Feature:` header with
//! optional free-text description, tagged `Scenario:` sections with optional
//! free-text descriptions and `Given`/`When`/`Then`/`And`/`But` steps.
//! `Background:` sections are recognized as delimiters but carry no
//! executable content here; `Scenario Outline:` is rejected.
//!
//! # Security Considerations
//!
//! - **Document size limits**: oversized documents are rejected before
//!   parsing (see [`crate::config::MAX_FEATURE_SIZE`])
//! - **Structure limits**: scenario and step counts are validated after
//!   parsing (see [`crate::config`])
//! - Error messages for file loads are sanitized to not expose full paths

use crate::config;
use crate::error::{EngineError, Result};
use crate::types::StepKeyword;
use crate::version::{Version, DIALECT_VERSION, SCENARIO_DESCRIPTIONS_SINCE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parser capabilities, derived from a dialect version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether free text between a scenario header and its first step is
    /// kept as the scenario description
    pub scenario_descriptions: bool,
}

impl ParseOptions {
    /// Derive the options a given dialect version provides.
    pub fn for_dialect(version: Version) -> Self {
        Self {
            scenario_descriptions: version >= SCENARIO_DESCRIPTIONS_SINCE,
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::for_dialect(DIALECT_VERSION)
    }
}

/// A single step line of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Keyword as written in the document
    pub keyword: StepKeyword,
    /// Step text after the keyword; step definitions match on this
    pub text: String,
}

impl Step {
    /// Display name used in step records (`"Given noop"`).
    pub fn display_name(&self) -> String {
        format!("{} {}", self.keyword, self.text)
    }
}

/// A scenario within a feature document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Free text between the scenario header and the first step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A parsed feature document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Source name the document was registered under (e.g. `sample.feature`)
    pub source: String,
    pub name: String,
    /// Free text between the feature header and the first scenario
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scenarios: Vec<Scenario>,
}

/// In-progress scenario while parsing.
struct ScenarioDraft {
    name: String,
    description_lines: Vec<String>,
    steps: Vec<Step>,
    tags: Vec<String>,
}

impl ScenarioDraft {
    fn finish(self, options: &ParseOptions) -> Scenario {
        let description = if options.scenario_descriptions {
            assemble_description(&self.description_lines)
        } else {
            if !self.description_lines.iter().all(|l| l.is_empty()) {
                tracing::debug!(
                    scenario = %self.name,
                    "Discarding scenario description (dialect predates scenario descriptions)"
                );
            }
            None
        };

        Scenario {
            name: self.name,
            description,
            steps: self.steps,
            tags: self.tags,
        }
    }
}

/// Parser position within the document.
enum ParseState {
    /// Before the `Feature:` header
    Preamble,
    /// After the header, collecting the feature description
    FeatureDescription,
    /// Inside a `Background:` section (content ignored)
    Background,
    /// After a scenario header, collecting its description
    ScenarioDescription,
    /// Inside a scenario's step list
    ScenarioSteps,
}

impl Feature {
    /// Parse a feature document from a string.
    ///
    /// # Arguments
    ///
    /// * `source` - Source name to register the document under
    /// * `content` - Gherkin document text
    /// * `options` - Dialect capabilities (see [`ParseOptions::for_dialect`])
    ///
    /// # Errors
    ///
    /// Returns `EngineError::LoadError` if the document exceeds the size
    /// limit or has no `Feature:` header, and `EngineError::ParseError` for
    /// malformed lines.
    pub fn parse(source: impl Into<String>, content: &str, options: &ParseOptions) -> Result<Self> {
        let source = source.into();

        if content.len() > config::MAX_FEATURE_SIZE {
            tracing::warn!(
                size = content.len(),
                max = config::MAX_FEATURE_SIZE,
                "Feature document exceeds size limit"
            );
            return Err(EngineError::LoadError(format!(
                "Feature document exceeds maximum size limit ({} bytes)",
                config::MAX_FEATURE_SIZE
            )));
        }

        let mut name: Option<String> = None;
        let mut feature_description_lines: Vec<String> = Vec::new();
        let mut scenarios: Vec<Scenario> = Vec::new();
        let mut pending_tags: Vec<String> = Vec::new();
        let mut current: Option<ScenarioDraft> = None;
        let mut state = ParseState::Preamble;

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();

            if line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix("Feature:") {
                if name.is_some() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "duplicate Feature header".to_string(),
                    });
                }
                let feature_name = rest.trim();
                if feature_name.is_empty() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "feature name is empty".to_string(),
                    });
                }
                name = Some(feature_name.to_string());
                state = ParseState::FeatureDescription;
                continue;
            }

            if line.starts_with('@') {
                if name.is_none() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "feature-level tags are not supported".to_string(),
                    });
                }
                for token in line.split_whitespace() {
                    match token.strip_prefix('@') {
                        Some(tag) if !tag.is_empty() => pending_tags.push(tag.to_string()),
                        _ => {
                            return Err(EngineError::ParseError {
                                line: line_number,
                                message: format!("malformed tag token '{}'", token),
                            })
                        }
                    }
                }
                continue;
            }

            if line.starts_with("Scenario Outline:") {
                return Err(EngineError::ParseError {
                    line: line_number,
                    message: "Scenario Outline is not supported".to_string(),
                });
            }

            if let Some(rest) = line.strip_prefix("Scenario:") {
                if name.is_none() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "scenario before Feature header".to_string(),
                    });
                }
                let scenario_name = rest.trim();
                if scenario_name.is_empty() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "scenario name is empty".to_string(),
                    });
                }
                if let Some(draft) = current.take() {
                    scenarios.push(draft.finish(options));
                }
                current = Some(ScenarioDraft {
                    name: scenario_name.to_string(),
                    description_lines: Vec::new(),
                    steps: Vec::new(),
                    tags: std::mem::take(&mut pending_tags),
                });
                state = ParseState::ScenarioDescription;
                continue;
            }

            if line.strip_prefix("Background:").is_some() {
                if name.is_none() {
                    return Err(EngineError::ParseError {
                        line: line_number,
                        message: "background before Feature header".to_string(),
                    });
                }
                if let Some(draft) = current.take() {
                    scenarios.push(draft.finish(options));
                }
                state = ParseState::Background;
                continue;
            }

            // Step line?
            let first_word = line.split_whitespace().next();
            if let Some(keyword) = first_word.and_then(StepKeyword::from_word) {
                match state {
                    ParseState::Background => continue,
                    ParseState::ScenarioDescription | ParseState::ScenarioSteps => {
                        let draft = match current.as_mut() {
                            Some(d) => d,
                            None => {
                                return Err(EngineError::ParseError {
                                    line: line_number,
                                    message: "step before any scenario".to_string(),
                                })
                            }
                        };
                        if keyword.is_conjunction() && draft.steps.is_empty() {
                            return Err(EngineError::ParseError {
                                line: line_number,
                                message: format!("'{}' may not open a scenario", keyword),
                            });
                        }
                        let text = line[keyword.to_string().len()..].trim();
                        if text.is_empty() {
                            return Err(EngineError::ParseError {
                                line: line_number,
                                message: "step text is empty".to_string(),
                            });
                        }
                        draft.steps.push(Step {
                            keyword,
                            text: text.to_string(),
                        });
                        state = ParseState::ScenarioSteps;
                    }
                    ParseState::Preamble | ParseState::FeatureDescription => {
                        return Err(EngineError::ParseError {
                            line: line_number,
                            message: "step before any scenario".to_string(),
                        })
                    }
                }
                continue;
            }

            // Free text or blank line
            match state {
                ParseState::Preamble => {
                    if !line.is_empty() {
                        return Err(EngineError::ParseError {
                            line: line_number,
                            message: "text before Feature header".to_string(),
                        });
                    }
                }
                ParseState::FeatureDescription => {
                    feature_description_lines.push(line.to_string());
                }
                ParseState::ScenarioDescription => {
                    if let Some(draft) = current.as_mut() {
                        draft.description_lines.push(line.to_string());
                    }
                }
                ParseState::ScenarioSteps => {
                    if !line.is_empty() {
                        return Err(EngineError::ParseError {
                            line: line_number,
                            message: format!("unexpected content after steps: '{}'", line),
                        });
                    }
                }
                ParseState::Background => {}
            }
        }

        if let Some(draft) = current.take() {
            scenarios.push(draft.finish(options));
        }
        if !pending_tags.is_empty() {
            tracing::warn!(source = %source, "Dangling tags at end of document discarded");
        }

        let name = name.ok_or_else(|| {
            EngineError::LoadError(format!("no Feature header found in '{}'", source))
        })?;

        let feature = Self {
            source,
            name,
            description: assemble_description(&feature_description_lines),
            scenarios,
        };
        feature.validate_limits()?;

        tracing::debug!(
            source = %feature.source,
            scenarios = feature.scenarios.len(),
            "Parsed feature document"
        );

        Ok(feature)
    }

    /// Load a feature document from a file.
    ///
    /// The document is registered under the file name (not the full path).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::LoadError` if the file cannot be read or
    /// exceeds the size limit. Error messages do not expose full paths.
    pub fn from_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!(path = %path_ref.display(), "Loading feature from file");

        let metadata = fs::metadata(path_ref)
            .map_err(|_| EngineError::LoadError("Failed to access feature file".to_string()))?;
        if metadata.len() as usize > config::MAX_FEATURE_SIZE {
            return Err(EngineError::LoadError(format!(
                "Feature file exceeds maximum size limit ({} bytes)",
                config::MAX_FEATURE_SIZE
            )));
        }

        let content = fs::read_to_string(path_ref)
            .map_err(|_| EngineError::LoadError("Failed to read feature file".to_string()))?;

        let source = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| EngineError::LoadError("Feature path has no file name".to_string()))?;

        Self::parse(source, &content, options)
    }

    /// Validate that the document stays within structure limits.
    fn validate_limits(&self) -> Result<()> {
        if self.scenarios.len() > config::MAX_SCENARIOS_PER_FEATURE {
            return Err(EngineError::LoadError(format!(
                "Too many scenarios in '{}' ({}, max {})",
                self.source,
                self.scenarios.len(),
                config::MAX_SCENARIOS_PER_FEATURE
            )));
        }
        for scenario in &self.scenarios {
            if scenario.steps.len() > config::MAX_STEPS_PER_SCENARIO {
                return Err(EngineError::LoadError(format!(
                    "Too many steps in scenario '{}' ({}, max {})",
                    scenario.name,
                    scenario.steps.len(),
                    config::MAX_STEPS_PER_SCENARIO
                )));
            }
        }
        Ok(())
    }

    /// Find a scenario by name.
    pub fn find_scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Check whether the document contains a scenario with the given name.
    pub fn has_scenario(&self, name: &str) -> bool {
        self.scenarios.iter().any(|s| s.name == name)
    }

    /// Names of all scenarios, in document order.
    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Assemble description lines into a single text.
///
/// Lines are already trimmed by the parser. Leading and trailing blank lines
/// are stripped; interior blank lines are preserved as paragraph breaks.
fn assemble_description(lines: &[String]) -> Option<String> {
    let mut slice: &[String] = lines;
    while slice.first().is_some_and(|l| l.is_empty()) {
        slice = &slice[1..];
    }
    while slice.last().is_some_and(|l| l.is_empty()) {
        slice = &slice[..slice.len() - 1];
    }
    if slice.is_empty() {
        None
    } else {
        Some(slice.join("\n"))
    }
}
