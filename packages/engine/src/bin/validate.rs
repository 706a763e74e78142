//! CLI binary for validating feature documents.
//!
//! Usage:
//!   cargo run --bin validate -- features/sample.feature [more.feature ...]
//!
//! Each argument is parsed with the compiled dialect. For every document a
//! JSON summary is printed on stdout:
//!   - source: String — the file name the document registers under
//!   - name: String — the feature name
//!   - description: Optional<String> — feature-level free text
//!   - scenarios: Array — per scenario: name, step count, description
//!   - error: Optional<String> — parse error if validation failed
//!
//! Exits non-zero if any document fails to parse.

use verslag_engine::{Feature, ParseOptions};

#[derive(serde::Serialize)]
struct ScenarioSummary {
    name: String,
    steps: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

#[derive(serde::Serialize)]
struct ValidateResponse {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scenarios: Vec<ScenarioSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn summarize(path: &str, feature: &Feature) -> ValidateResponse {
    ValidateResponse {
        path: path.to_string(),
        source: Some(feature.source.clone()),
        name: Some(feature.name.clone()),
        description: feature.description.clone(),
        scenarios: feature
            .scenarios
            .iter()
            .map(|s| ScenarioSummary {
                name: s.name.clone(),
                steps: s.steps.len(),
                description: s.description.clone(),
            })
            .collect(),
        error: None,
    }
}

fn error_response(path: &str, message: String) -> ValidateResponse {
    ValidateResponse {
        path: path.to_string(),
        source: None,
        name: None,
        description: None,
        scenarios: Vec::new(),
        error: Some(message),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: validate <feature-file> [<feature-file> ...]");
        std::process::exit(2);
    }

    let options = ParseOptions::default();
    let mut failed = false;

    for path in &args {
        let response = match Feature::from_file(path, &options) {
            Ok(feature) => summarize(path, &feature),
            Err(e) => {
                failed = true;
                error_response(path, e.to_string())
            }
        };
        println!(
            "{}",
            serde_json::to_string(&response).unwrap_or_default()
        );
    }

    if failed {
        std::process::exit(1);
    }
}
