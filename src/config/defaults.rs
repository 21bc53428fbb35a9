//! Default values and configuration sections with default implementations.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::TestType;
use crate::prompts::DEFAULT_VERSION;
use crate::render::OutputFormat;
use crate::retry::RetryPolicy;

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(default_prompt_version, String, DEFAULT_VERSION.to_string());
default_fn!(default_output_dir, String, "output".to_string());
default_fn!(default_compliance_annex, bool, true);

/// How procedures are generated
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_prompt_version")]
    pub prompt_version: String,
    #[serde(default)]
    pub test_type: TestType,
    #[serde(flatten)]
    pub retry: RetryPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            prompt_version: default_prompt_version(),
            test_type: TestType::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Where and how rendered documents are written
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// Output directory; `~` is expanded
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_compliance_annex")]
    pub compliance_annex: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: OutputFormat::default(),
            compliance_annex: default_compliance_annex(),
        }
    }
}

impl OutputConfig {
    /// Output directory with `~` expanded
    pub fn resolved_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.dir).to_string())
    }
}
