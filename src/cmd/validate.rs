//! `testproc validate`: check an existing procedure against a project.

use anyhow::Result;
use std::path::Path;

use testproc::config::Config;
use testproc::domain::Project;
use testproc::formatters::format_validation_report;
use testproc::validation::{MatchMode, Validator};

use super::read_content;

/// Returns whether validation passed.
pub fn cmd_validate(
    config: &Config,
    project_path: &Path,
    content_path: &Path,
    json: bool,
    strict: bool,
    match_mode: Option<MatchMode>,
) -> Result<bool> {
    let project = Project::load(project_path)?;
    let content = read_content(content_path)?;

    let mut validation = config.validation.clone();
    validation.strict |= strict;
    if let Some(mode) = match_mode {
        validation.match_mode = mode;
    }

    let result = Validator::new(validation).validate(&content, &project);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_validation_report(&result));
    }

    Ok(result.passed())
}
