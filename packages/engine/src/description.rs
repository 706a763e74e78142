//! Description resolution for test cases
//!
//! A test case's human-readable description can come from four places. This
//! module owns the precedence policy that picks the winner.
//!
//! # Resolution Priority
//!
//! Per channel, first present value wins:
//! 1. **Dynamic** - set at runtime through the scenario context
//! 2. **Binding** - declared statically on the scenario binding
//! 3. **Module default** - declared on the binding module, applying to every
//!    scenario it binds
//! 4. **Document** - free text from the feature file (plain channel only)
//!
//! The plain and HTML channels resolve independently: a dynamic HTML
//! description does not displace a static plain one, and document text never
//! feeds the HTML channel.
//!
//! # Document text
//!
//! When neither an override nor a default exists, the plain description is
//! taken from the feature file itself: feature-level free text and
//! scenario-level free text are concatenated with one blank line when both
//! are present; either one alone is used verbatim.

use serde::Serialize;

/// Separator between feature-level and scenario-level document text.
const DOCUMENT_TEXT_SEPARATOR: &str = "\n\n";

/// Which source produced the resolved description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionOrigin {
    Dynamic,
    Binding,
    ModuleDefault,
    Document,
}

/// Candidate values for one description channel, ordered by the caller.
#[derive(Debug, Clone, Default)]
pub struct DescriptionSources {
    /// Runtime value from the scenario context
    pub dynamic: Option<String>,
    /// Static value from the scenario binding
    pub binding: Option<String>,
    /// Default from the binding module
    pub module_default: Option<String>,
    /// Free text from the feature document
    pub document: Option<String>,
}

impl DescriptionSources {
    /// Resolve the channel: the highest-priority present value wins.
    ///
    /// An empty-but-set value still wins; setting a description to `""` is
    /// an explicit override, not an absence.
    pub fn resolve(self) -> Option<(String, DescriptionOrigin)> {
        if let Some(value) = self.dynamic {
            return Some((value, DescriptionOrigin::Dynamic));
        }
        if let Some(value) = self.binding {
            return Some((value, DescriptionOrigin::Binding));
        }
        if let Some(value) = self.module_default {
            return Some((value, DescriptionOrigin::ModuleDefault));
        }
        self.document
            .map(|value| (value, DescriptionOrigin::Document))
    }
}

/// Both resolved description channels for one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDescription {
    pub description: Option<String>,
    pub description_html: Option<String>,
    /// Source that won the plain channel, if any
    pub origin: Option<DescriptionOrigin>,
    /// Source that won the HTML channel, if any
    pub origin_html: Option<DescriptionOrigin>,
}

impl ResolvedDescription {
    /// Resolve both channels from their source sets.
    pub fn resolve(plain: DescriptionSources, html: DescriptionSources) -> Self {
        let (description, origin) = match plain.resolve() {
            Some((value, origin)) => (Some(value), Some(origin)),
            None => (None, None),
        };
        let (description_html, origin_html) = match html.resolve() {
            Some((value, origin)) => (Some(value), Some(origin)),
            None => (None, None),
        };

        tracing::debug!(?origin, ?origin_html, "Resolved description channels");

        Self {
            description,
            description_html,
            origin,
            origin_html,
        }
    }
}

/// Combine feature-level and scenario-level document text.
///
/// Both present: concatenated with one blank line. One present: used
/// verbatim. Neither: `None`.
pub fn document_text(feature: Option<&str>, scenario: Option<&str>) -> Option<String> {
    match (feature, scenario) {
        (Some(f), Some(s)) => Some(format!("{f}{DOCUMENT_TEXT_SEPARATOR}{s}")),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(s)) => Some(s.to_string()),
        (None, None) => None,
    }
}
