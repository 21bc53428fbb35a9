//! Configuration management for testproc.
//!
//! Config lives in the YAML frontmatter of a Markdown file. The project file
//! `.testproc/config.md` is merged over the global file
//! `~/.config/testproc/config.md`; every section is optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::TestType;
use crate::provider::{LiveConfig, ProviderConfig, ProviderKind};
use crate::retry::RetryPolicy;
use crate::validation::ValidationConfig;

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// Project config path, relative to the working directory
pub const PROJECT_CONFIG_PATH: &str = ".testproc/config.md";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Split `---` delimited YAML frontmatter from the Markdown body
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };

    match rest.find("\n---") {
        Some(end) => {
            let frontmatter = rest[..end].to_string();
            let body = rest[end + 4..].trim_start();
            (Some(frontmatter), body)
        }
        None => (None, content),
    }
}

fn parse_frontmatter<T>(content: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let (frontmatter, _body) = split_frontmatter(content);
    let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

    if frontmatter.trim().is_empty() {
        return Ok(T::default());
    }

    serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
}

impl Config {
    /// Load the merged global and project configuration from the standard paths.
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(PROJECT_CONFIG_PATH))
    }

    /// Load a single config file without merging.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = parse_frontmatter(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load merged configuration from specified global and project config paths.
    /// Either file may be absent; project values override global values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;

        debug!(
            provider = %config.provider.kind,
            prompt_version = %config.generation.prompt_version,
            "configuration loaded"
        );

        Ok(config)
    }
}

/// Returns the path to the global config file at ~/.config/testproc/config.md
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("testproc").join("config.md"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub provider: Option<PartialProviderConfig>,
    pub generation: Option<PartialGenerationConfig>,
    pub validation: Option<ValidationConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialProviderConfig {
    pub kind: Option<ProviderKind>,
    pub live: Option<PartialLiveConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialLiveConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialGenerationConfig {
    pub prompt_version: Option<String>,
    pub test_type: Option<TestType>,
    pub max_retries: Option<usize>,
    pub retry_delay_ms: Option<u64>,
    pub backoff_multiplier: Option<f64>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        parse_frontmatter(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_provider = self.provider.unwrap_or_default();
        let project_provider = project.provider.unwrap_or_default();
        let global_live = global_provider.live.unwrap_or_default();
        let project_live = project_provider.live.unwrap_or_default();
        let global_generation = self.generation.unwrap_or_default();
        let project_generation = project.generation.unwrap_or_default();

        let live_defaults = LiveConfig::default();
        let retry_defaults = RetryPolicy::default();

        Config {
            provider: ProviderConfig {
                kind: project_provider
                    .kind
                    .or(global_provider.kind)
                    .unwrap_or_default(),
                live: LiveConfig {
                    endpoint: project_live
                        .endpoint
                        .or(global_live.endpoint)
                        .unwrap_or(live_defaults.endpoint),
                    model: project_live
                        .model
                        .or(global_live.model)
                        .unwrap_or(live_defaults.model),
                    temperature: project_live
                        .temperature
                        .or(global_live.temperature)
                        .unwrap_or(live_defaults.temperature),
                    max_tokens: project_live
                        .max_tokens
                        .or(global_live.max_tokens)
                        .unwrap_or(live_defaults.max_tokens),
                    timeout_secs: project_live
                        .timeout_secs
                        .or(global_live.timeout_secs)
                        .unwrap_or(live_defaults.timeout_secs),
                    api_key: project_live.api_key.or(global_live.api_key),
                },
            },
            generation: GenerationConfig {
                prompt_version: project_generation
                    .prompt_version
                    .or(global_generation.prompt_version)
                    .unwrap_or_else(defaults::default_prompt_version),
                test_type: project_generation
                    .test_type
                    .or(global_generation.test_type)
                    .unwrap_or_default(),
                retry: RetryPolicy {
                    max_retries: project_generation
                        .max_retries
                        .or(global_generation.max_retries)
                        .unwrap_or(retry_defaults.max_retries),
                    retry_delay_ms: project_generation
                        .retry_delay_ms
                        .or(global_generation.retry_delay_ms)
                        .unwrap_or(retry_defaults.retry_delay_ms),
                    backoff_multiplier: project_generation
                        .backoff_multiplier
                        .or(global_generation.backoff_multiplier)
                        .unwrap_or(retry_defaults.backoff_multiplier),
                },
            },
            // Sections without per-field merge: project section replaces global
            validation: project
                .validation
                .or(self.validation)
                .unwrap_or_default(),
            output: project.output.or(self.output).unwrap_or_default(),
        }
    }
}
