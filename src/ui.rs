//! Terminal output helpers for the testproc CLI.
//!
//! Honors `TESTPROC_QUIET` (no spinners) and `NO_COLOR` (via `colored`).

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Check if quiet mode is enabled via the TESTPROC_QUIET environment variable
pub fn is_quiet() -> bool {
    std::env::var("TESTPROC_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored icon for a validation outcome.
///
/// Icons:
/// - passed: ✓ (green)
/// - failed: ✗ (red)
pub fn status_icon(passed: bool) -> ColoredString {
    if passed {
        colors::success("✓")
    } else {
        colors::error("✗")
    }
}

/// Colored PASSED/FAILED label
pub fn status_label(passed: bool) -> ColoredString {
    if passed {
        colors::success("PASSED").bold()
    } else {
        colors::error("FAILED").bold()
    }
}

/// Spinner shown while waiting on a provider. Hidden in quiet mode.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} ({elapsed})") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (project and signal IDs)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary information
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_is_quiet_reads_env() {
        std::env::set_var("TESTPROC_QUIET", "true");
        assert!(is_quiet());
        std::env::set_var("TESTPROC_QUIET", "0");
        assert!(!is_quiet());
        std::env::remove_var("TESTPROC_QUIET");
        assert!(!is_quiet());
    }

    #[test]
    fn test_status_label_text() {
        colored::control::set_override(false);
        assert_eq!(status_label(true).to_string(), "PASSED");
        assert_eq!(status_label(false).to_string(), "FAILED");
        assert_eq!(status_icon(true).to_string(), "✓");
        assert_eq!(status_icon(false).to_string(), "✗");
    }

    #[test]
    fn test_success_color_is_green() {
        assert_eq!(status_label(true).fgcolor(), Some(colored::Color::Green));
        assert_eq!(status_icon(false).fgcolor(), Some(colored::Color::Red));
        assert_eq!(colors::success("ok").fgcolor(), Some(colored::Color::Green));
    }
}
