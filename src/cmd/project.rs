//! `testproc check` and `testproc sample`.

use anyhow::Result;
use std::path::Path;

use testproc::domain::{lint_project, Project, SAMPLE_PROJECT_JSON};
use testproc::formatters::format_project_summary;

/// Load and lint a project. Lint findings are warnings, so a project that
/// loads always passes.
pub fn cmd_check(path: &Path) -> Result<bool> {
    let project = Project::load(path)?;
    let warnings = lint_project(&project);
    println!("{}", format_project_summary(&project, &warnings));
    Ok(true)
}

pub fn cmd_sample() -> Result<()> {
    print!("{}", SAMPLE_PROJECT_JSON);
    Ok(())
}
