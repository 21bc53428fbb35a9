//! # Versioned Prompt Templates
//!
//! Prompt templates are embedded at compile time using `include_str!` and
//! rendered with Tera against a [`Project`]. Each version is kept so that
//! generations can be compared across prompt revisions.

use anyhow::{Context, Result};
use serde::Serialize;
use tera::Tera;
use tracing::{debug, warn};

use crate::domain::{Project, TestType};

/// Version used when none is requested or the requested one is unknown
pub const DEFAULT_VERSION: &str = "v1.1";

/// Metadata about a bundled prompt
#[derive(Debug, Clone)]
pub struct PromptMetadata {
    /// Version tag, also the template name
    pub version: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

/// Returns all bundled prompts, oldest first
pub fn all_prompts() -> Vec<PromptMetadata> {
    vec![
        PromptMetadata {
            version: "v1.0",
            description: "Initial basic prompt",
            content: include_str!("../templates/prompts/v1.0.md"),
        },
        PromptMetadata {
            version: "v1.1",
            description: "Enhanced with validation rules and structure",
            content: include_str!("../templates/prompts/v1.1.md"),
        },
        PromptMetadata {
            version: "v1.2",
            description: "Added safety considerations and compliance hints",
            content: include_str!("../templates/prompts/v1.2.md"),
        },
    ]
}

/// Look up a bundled prompt by version
pub fn get_prompt(version: &str) -> Option<PromptMetadata> {
    all_prompts().into_iter().find(|p| p.version == version)
}

/// Version tags with their descriptions
pub fn list_versions() -> Vec<(&'static str, &'static str)> {
    all_prompts()
        .into_iter()
        .map(|p| (p.version, p.description))
        .collect()
}

#[derive(Serialize)]
struct SignalContext {
    id: String,
    kind: &'static str,
    range: String,
    unit: String,
    accuracy: String,
    description: String,
    hazardous: bool,
}

#[derive(Serialize)]
struct RequirementContext {
    id: String,
    text: String,
    priority: String,
    category: Option<String>,
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}

/// Renders prompt templates for a project
pub struct PromptBuilder {
    tera: Tera,
}

impl PromptBuilder {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        for prompt in all_prompts() {
            tera.add_raw_template(prompt.version, prompt.content)
                .with_context(|| format!("Failed to load prompt template {}", prompt.version))?;
        }
        Ok(Self { tera })
    }

    /// Render the prompt for `project`.
    ///
    /// Unknown versions fall back to [`DEFAULT_VERSION`] with a warning. The
    /// returned tuple carries the version actually used.
    pub fn build(
        &self,
        project: &Project,
        test_type: TestType,
        version: &str,
        required_sections: &[String],
    ) -> Result<(String, &'static str)> {
        let resolved = match get_prompt(version) {
            Some(prompt) => prompt.version,
            None => {
                warn!(
                    requested = version,
                    fallback = DEFAULT_VERSION,
                    "unknown prompt version"
                );
                DEFAULT_VERSION
            }
        };

        let signals: Vec<SignalContext> = project
            .signals()
            .iter()
            .map(|s| SignalContext {
                id: s.id.to_string(),
                kind: s.signal_type.label(),
                range: s.range.clone(),
                unit: or_na(s.unit.as_deref()),
                accuracy: or_na(s.accuracy.as_deref()),
                description: or_na(s.description.as_deref()),
                hazardous: s.signal_type.is_hazardous_measurement(),
            })
            .collect();

        let requirements: Vec<RequirementContext> = project
            .requirements()
            .iter()
            .map(|r| RequirementContext {
                id: r.id().to_string(),
                text: r.text().to_string(),
                priority: r.priority().to_string(),
                category: r.category().map(str::to_string),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("test_type", test_type.title());
        context.insert("project_id", project.project_id());
        context.insert("system_name", project.system());
        context.insert("environment", project.environment());
        context.insert("signal_count", &project.signal_count());
        context.insert("requirement_count", &project.requirement_count());
        context.insert("signals", &signals);
        context.insert("requirements", &requirements);
        context.insert("required_sections", required_sections);

        let prompt = self
            .tera
            .render(resolved, &context)
            .with_context(|| format!("Failed to render prompt {}", resolved))?;

        debug!(
            version = resolved,
            prompt_length = prompt.len(),
            "prompt prepared"
        );

        Ok((prompt, resolved))
    }
}
