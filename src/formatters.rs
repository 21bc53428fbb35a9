//! Output formatters for validation and generation results
//!
//! Transforms results into colored multi-section terminal text.

use colored::Colorize;

use crate::domain::{untraced_signals, Project};
use crate::generator::GenerationMetadata;
use crate::ui::{self, colors};
use crate::validation::ValidationResult;

/// Format a validation result as a multi-section report
pub fn format_validation_report(result: &ValidationResult) -> String {
    let total = result.covered_signals().len() + result.missing_signals().len();
    let mut output = vec![
        "Validation Report".bold().to_string(),
        "=================".to_string(),
        String::new(),
        format!("  {:<10} {}", "Status:", ui::status_label(result.passed())),
        format!(
            "  {:<10} {:.1}% ({}/{} signals)",
            "Coverage:",
            result.coverage_pct(),
            result.covered_signals().len(),
            total
        ),
    ];

    if !result.missing_signals().is_empty() {
        output.push(String::new());
        output.push("Missing Signals".bold().to_string());
        output.push("───────────────".to_string());
        for id in result.missing_signals() {
            output.push(format!("  {} {}", "✗".red(), colors::identifier(id.as_str())));
        }
    }

    if !result.errors().is_empty() {
        output.push(String::new());
        output.push("Errors".bold().to_string());
        output.push("──────".to_string());
        for error in result.errors() {
            output.push(format!("  {}", colors::error(error)));
        }
    }

    if !result.warnings().is_empty() {
        output.push(String::new());
        output.push("Warnings".bold().to_string());
        output.push("────────".to_string());
        for warning in result.warnings() {
            output.push(format!("  {} {}", "⚠".yellow(), warning));
        }
    }

    output.join("\n")
}

/// Format generation metadata as an aligned block
pub fn format_generation_metadata(meta: &GenerationMetadata) -> String {
    let tokens = match meta.tokens {
        Some(usage) => format!(
            "{} (in {}, out {})",
            usage.total(),
            usage.input,
            usage.output
        ),
        None => "unknown".to_string(),
    };

    [
        format!("  {:<16} {}", "Provider:", meta.provider),
        format!("  {:<16} {}", "Model:", meta.model),
        format!("  {:<16} {}", "Prompt version:", meta.prompt_version),
        format!("  {:<16} {}", "Tokens:", tokens),
        format!("  {:<16} ${:.4}", "Cost:", meta.cost_usd),
        format!(
            "  {:<16} {:.2}s ({} attempt{})",
            "Time:",
            meta.elapsed_ms as f64 / 1000.0,
            meta.attempts,
            if meta.attempts == 1 { "" } else { "s" }
        ),
    ]
    .join("\n")
}

/// Format a project summary for `testproc check`
pub fn format_project_summary(project: &Project, warnings: &[String]) -> String {
    let mut output = vec![
        format!(
            "{} {} {}",
            ui::status_icon(true),
            colors::identifier(project.project_id()),
            project.system()
        ),
        format!(
            "  {} signals, {} requirements",
            project.signal_count(),
            project.requirement_count()
        ),
    ];

    for signal in project.signals() {
        output.push(format!(
            "  {:<14} {:<16} {}",
            colors::identifier(signal.id.as_str()),
            signal.signal_type.label(),
            colors::secondary(&signal.range)
        ));
    }

    let untraced = untraced_signals(project);
    if !untraced.is_empty() && !project.requirements().is_empty() {
        output.push(format!(
            "  {} {}",
            colors::secondary("Not referenced by any requirement:"),
            untraced.join(", ")
        ));
    }

    for warning in warnings {
        output.push(format!("  {} {}", "⚠".yellow(), colors::warning(warning)));
    }

    output.join("\n")
}
