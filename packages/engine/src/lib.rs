//! verslag Engine
//!
//! A Rust implementation of the verslag test-reporting engine.
//! This library provides functionality for:
//! - Loading and parsing Gherkin feature documents
//! - Binding scenarios to step definitions and executing them
//! - Resolving test-case descriptions (plain text and HTML) through a
//!   precedence policy: runtime overrides beat static declarations, which
//!   beat module defaults, which beat feature-file free text
//! - Emitting one JSON result record per test case
//!
//! # Example
//!
//! ```ignore
//! use verslag_engine::{BindingModule, ScenarioBinding, SuiteRunner};
//!
//! let mut runner = SuiteRunner::new();
//! runner.add_feature_file("features/sample.feature")?;
//! runner.register_module(
//!     BindingModule::builder("steps")
//!         .step("noop", |_| Ok(()))
//!         .scenario(
//!             ScenarioBinding::new("sample.feature", "Bar")
//!                 .with_description("Lorem Ipsum"),
//!         )
//!         .build(),
//! );
//!
//! let report = runner.run()?;
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod description;
pub mod engine;
pub mod error;
pub mod feature;
pub mod ident;
pub mod report;
pub mod service;
pub mod types;
pub mod version;

// Re-export commonly used items
pub use binding::{BindingModule, BindingModuleBuilder, ScenarioBinding, StepDef, StepHandler};
pub use config::ReportConfig;
pub use context::ScenarioContext;
pub use description::{document_text, DescriptionOrigin, DescriptionSources, ResolvedDescription};
pub use engine::ScenarioEngine;
pub use error::{EngineError, Result};
pub use feature::{Feature, ParseOptions, Scenario, Step};
pub use ident::{history_id, CaseId};
pub use report::{ResultWriter, RunReport, StatusDetails, StepRecord, TestResult};
pub use service::SuiteRunner;
pub use types::{Label, Status, StepKeyword};
pub use version::{Version, DIALECT_VERSION, SCENARIO_DESCRIPTIONS_SINCE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
