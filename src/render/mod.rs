//! Document rendering for validated procedures.
//!
//! A renderer turns generated text plus its [`ValidationResult`] into the
//! bytes of a deliverable. Both renderers can append a compliance annex
//! summarising the validation outcome.

pub mod html;
pub mod markdown;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Project, TestType};
use crate::generator::GenerationMetadata;
use crate::validation::ValidationResult;

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;

/// Everything about a document other than its body
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub project: &'a Project,
    pub test_type: TestType,
    pub generated_at: DateTime<Utc>,
    pub generation: Option<&'a GenerationMetadata>,
}

impl<'a> RenderContext<'a> {
    pub fn new(project: &'a Project, test_type: TestType) -> Self {
        Self {
            project,
            test_type,
            generated_at: Utc::now(),
            generation: None,
        }
    }

    pub fn with_generation(mut self, metadata: &'a GenerationMetadata) -> Self {
        self.generation = Some(metadata);
        self
    }

    /// Document title, e.g. `FAT Procedure: P-1`
    pub fn title(&self) -> String {
        format!("{} Procedure: {}", self.test_type.code(), self.project.project_id())
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

/// Renders a procedure and its validation outcome into a file's bytes
pub trait DocumentRenderer {
    fn render(
        &self,
        content: &str,
        result: &ValidationResult,
        context: &RenderContext<'_>,
    ) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Markdown,
}

impl OutputFormat {
    /// Build the renderer for this format
    pub fn renderer(self, compliance_annex: bool) -> Result<Box<dyn DocumentRenderer>> {
        Ok(match self {
            OutputFormat::Html => Box::new(HtmlRenderer::new(compliance_annex)?),
            OutputFormat::Markdown => Box::new(MarkdownRenderer::new(compliance_annex)),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown format '{}'. Valid formats: html, markdown", s)),
        }
    }
}

/// File name for a rendered procedure: `{project_id}_{TEST_TYPE}.{ext}`.
///
/// Characters outside `[A-Za-z0-9._-]` in the project id become `_`.
pub fn output_file_name(project_id: &str, test_type: TestType, extension: &str) -> String {
    let safe_id: String = project_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.{}", safe_id, test_type.code(), extension)
}

/// Markdown summary of a validation result, appended to rendered documents.
pub fn compliance_annex(result: &ValidationResult, context: &RenderContext<'_>) -> String {
    let status = if result.passed() { "PASSED" } else { "FAILED" };
    let total = result.covered_signals().len() + result.missing_signals().len();

    let mut lines = vec![
        "## Compliance Annex".to_string(),
        String::new(),
        "| Item | Value |".to_string(),
        "|------|-------|".to_string(),
        format!("| Project | {} |", context.project.project_id()),
        format!("| Test type | {} |", context.test_type.title()),
        format!("| Validation status | {} |", status),
        format!("| Signal coverage | {:.1}% |", result.coverage_pct()),
        format!(
            "| Signals covered | {} / {} |",
            result.covered_signals().len(),
            total
        ),
        format!("| Generated | {} |", context.timestamp()),
    ];

    if let Some(meta) = context.generation {
        lines.push(format!("| Model | {} |", meta.model));
        lines.push(format!("| Prompt version | {} |", meta.prompt_version));
    }

    push_list(&mut lines, "Missing Signals", result.missing_signals());
    push_list(&mut lines, "Errors", result.errors());
    push_list(&mut lines, "Warnings", result.warnings());

    lines.join("\n") + "\n"
}

fn push_list<T: fmt::Display>(lines: &mut Vec<String>, heading: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("### {}", heading));
    lines.push(String::new());
    lines.extend(items.iter().map(|item| format!("- {}", item)));
}
