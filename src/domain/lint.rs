//! Pure, non-fatal checks on a valid project.
//!
//! Hard invariants live in [`Project::new`](super::Project::new); the
//! functions here only flag things that weaken a generated procedure.

use super::Project;

/// Collect non-fatal warnings about a project, in a stable order.
///
/// # Returns
///
/// One message per finding:
/// - no signals defined (nothing to cover)
/// - no requirements defined (no traceability)
/// - each signal without a range, in signal order
pub fn lint_project(project: &Project) -> Vec<String> {
    let mut warnings = Vec::new();

    if project.signals().is_empty() {
        warnings.push("No signals defined - coverage cannot be computed".to_string());
    }

    if project.requirements().is_empty() {
        warnings.push("No requirements defined - tests may lack traceability".to_string());
    }

    for signal in project.signals() {
        if signal.range.trim().is_empty() {
            warnings.push(format!("Signal {} has no range specified", signal.id));
        }
    }

    warnings
}

/// Signals not referenced by any requirement.
pub fn untraced_signals(project: &Project) -> Vec<&str> {
    project
        .signals()
        .iter()
        .filter(|s| project.requirements_for(&s.id).next().is_none())
        .map(|s| s.id.as_str())
        .collect()
}
