//! Reference project used by `testproc sample` and in tests.

use anyhow::Result;

use super::Project;

/// Sample project definition (JSON)
pub const SAMPLE_PROJECT_JSON: &str = include_str!("../../templates/sample/project.json");

/// Parse the bundled sample project
pub fn sample_project() -> Result<Project> {
    Project::from_json(SAMPLE_PROJECT_JSON)
}
