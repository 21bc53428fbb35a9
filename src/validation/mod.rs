//! Deterministic compliance checking of generated test procedures.
//!
//! The validator cross-checks free text produced by a text provider against
//! the project it was generated for. It never edits the text; coverage gaps
//! and structural problems are reported as data in a [`ValidationResult`].
//!
//! Validation is a pure function of `(content, project, config)`: no I/O, no
//! global state, and identical inputs always produce identical results.

pub mod coverage;
pub mod structure;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::domain::{lint_project, Project, SignalId};

pub use coverage::{mentions, Coverage, MatchMode};
pub use structure::{
    compliance_warnings, content_warnings, missing_sections, DEFAULT_RECOMMENDED_SECTIONS,
    DEFAULT_REQUIRED_SECTIONS,
};

/// Prefix applied to warnings promoted to errors in strict mode
pub const STRICT_PREFIX: &str = "STRICT: ";

fn default_required_sections() -> Vec<String> {
    DEFAULT_REQUIRED_SECTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_recommended_sections() -> Vec<String> {
    DEFAULT_RECOMMENDED_SECTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_true() -> bool {
    true
}

/// Validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// How signal ids are matched in the text
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Section markers that must appear in the text (case-insensitive)
    #[serde(default = "default_required_sections")]
    pub required_sections: Vec<String>,
    /// Promote content warnings to errors when coverage is below 100%
    #[serde(default)]
    pub strict: bool,
    /// Run the advisory content heuristics (placeholders, step numbering, ...)
    #[serde(default = "default_true")]
    pub check_placeholders: bool,
    /// Sections whose absence is reported as a warning
    #[serde(default = "default_recommended_sections")]
    pub recommended_sections: Vec<String>,
    /// Run the compliance checks (recommended sections, electronic signatures)
    #[serde(default = "default_true")]
    pub check_compliance: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            required_sections: default_required_sections(),
            strict: false,
            check_placeholders: true,
            recommended_sections: default_recommended_sections(),
            check_compliance: true,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.required_sections.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("validation.required_sections must not contain empty markers");
        }
        Ok(())
    }
}

/// Outcome of validating one generated text against its project.
///
/// Built once per validation call and never modified afterwards; `passed`
/// is derived from `missing_signals` and `errors` at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    passed: bool,
    coverage_pct: f64,
    missing_signals: Vec<SignalId>,
    errors: Vec<String>,
    warnings: Vec<String>,
    covered_signals: Vec<SignalId>,
}

impl ValidationResult {
    fn new(coverage: Coverage, errors: Vec<String>, warnings: Vec<String>) -> Self {
        let coverage_pct = coverage.percent();
        let (covered_signals, missing_signals) = coverage.into_parts();
        Self {
            passed: missing_signals.is_empty() && errors.is_empty(),
            coverage_pct,
            missing_signals,
            errors,
            warnings,
            covered_signals,
        }
    }

    /// True iff every signal is covered and no structural error was found.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Percentage of project signals mentioned, rounded to one decimal.
    pub fn coverage_pct(&self) -> f64 {
        self.coverage_pct
    }

    /// Signals never mentioned, in project order
    pub fn missing_signals(&self) -> &[SignalId] {
        &self.missing_signals
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Non-failing observations
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Signals mentioned, in project order
    pub fn covered_signals(&self) -> &[SignalId] {
        &self.covered_signals
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Report")?;
        writeln!(f, "{}", if self.passed { "PASSED" } else { "FAILED" })?;
        writeln!(f, "Coverage: {:.1}%", self.coverage_pct)?;
        writeln!(f, "Errors: {}", self.errors.len())?;
        write!(f, "Warnings: {}", self.warnings.len())
    }
}

/// Validation engine holding its configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check `content` against every signal and required section of `project`.
    ///
    /// Empty content is ordinary input: with at least one signal it fails
    /// with every signal missing and 0.0 coverage.
    pub fn validate(&self, content: &str, project: &Project) -> ValidationResult {
        let coverage = Coverage::compute(content, project.signals(), self.config.match_mode);

        let mut errors: Vec<String> = missing_sections(content, &self.config.required_sections)
            .into_iter()
            .map(|marker| format!("Missing required section: {}", marker))
            .collect();

        let mut warnings = lint_project(project);
        let mut advisories = if self.config.check_placeholders {
            content_warnings(content)
        } else {
            Vec::new()
        };

        if self.config.strict && coverage.percent() < 100.0 {
            errors.extend(
                advisories
                    .drain(..)
                    .map(|w| format!("{}{}", STRICT_PREFIX, w)),
            );
        }
        warnings.append(&mut advisories);
        if self.config.check_compliance {
            warnings.extend(compliance_warnings(
                content,
                &self.config.recommended_sections,
            ));
        }

        debug!(
            project_id = project.project_id(),
            signals = coverage.total(),
            missing = coverage.missing().len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "validated generated content"
        );

        ValidationResult::new(coverage, errors, warnings)
    }
}

/// Validate `content` against `project` with the default configuration.
pub fn validate_all(content: &str, project: &Project) -> ValidationResult {
    Validator::default().validate(content, project)
}
