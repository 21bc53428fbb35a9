//! Command module structure for testproc CLI

use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

use testproc::config::Config;

pub mod generate;
pub mod project;
pub mod prompts;
pub mod validate;

/// Environment variable supplying the live provider key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Load configuration: the explicit file if given, otherwise the merged
/// global and project configs.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Read procedure text from a file, or stdin when the path is `-`.
pub fn read_content(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read procedure from stdin")?;
        return Ok(content);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read procedure from {}", path.display()))
}

/// API key from the environment, ignoring blank values
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}
