//! Structural checks: required section markers and document heuristics.
//!
//! Missing section markers are errors. Everything else in this module is
//! advisory and only produces warnings.

use regex::Regex;
use std::sync::OnceLock;

/// Section markers a procedure must contain unless configured otherwise
pub const DEFAULT_REQUIRED_SECTIONS: &[&str] =
    &["Purpose", "Procedure", "Expected Result", "Sign-Off"];

/// Sections a compliant procedure should have; absence is only a warning
pub const DEFAULT_RECOMMENDED_SECTIONS: &[&str] = &["procedure", "expected", "equipment"];

/// Text fragments that indicate an unfinished generation
pub const PLACEHOLDERS: &[&str] = &["TBD", "TODO", "[INSERT", "XXX", "PLACEHOLDER"];

const EXPECTED_RESULT_KEYWORDS: &[&str] = &[
    "expected",
    "result",
    "acceptance",
    "criteria",
    "pass",
    "fail",
    "verify",
    "confirm",
];

/// Return the markers that do not appear in `content`, in configured order.
///
/// Matching ignores case, so `## PURPOSE` satisfies the `Purpose` marker.
pub fn missing_sections<'a>(content: &str, sections: &'a [String]) -> Vec<&'a str> {
    let haystack = content.to_lowercase();
    sections
        .iter()
        .map(|s| s.trim())
        .filter(|marker| !marker.is_empty() && !haystack.contains(&marker.to_lowercase()))
        .collect()
}

fn numbered_step_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:\d+[.)]|Step\s+\d+:)").expect("numbered step pattern is valid")
    })
}

fn skip_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"(?i)\bskip\s+(?:this\s+)?test\b", "skip this test"),
            (r"(?i)\btest\s+(?:is\s+)?not\s+applicable\b", "test not applicable"),
            (r"\bN/A\b", "N/A"),
        ]
        .into_iter()
        .map(|(pattern, label)| (Regex::new(pattern).expect("skip pattern is valid"), label))
        .collect()
    })
}

/// True when the text contains at least one numbered step (`1.`, `1)` or `Step 1:`).
pub fn has_numbered_steps(content: &str) -> bool {
    numbered_step_pattern().is_match(content)
}

/// True when the text uses any pass/fail or expected-result vocabulary.
pub fn has_expected_results(content: &str) -> bool {
    let lower = content.to_lowercase();
    EXPECTED_RESULT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Advisory findings about the generated text, in a fixed order:
/// placeholders, skip phrases, step numbering, expected results, safety.
pub fn content_warnings(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();
    let lower = content.to_lowercase();

    for placeholder in PLACEHOLDERS {
        if lower.contains(&placeholder.to_lowercase()) {
            warnings.push(format!("Document contains placeholder text: {}", placeholder));
        }
    }

    for (pattern, label) in skip_patterns() {
        if pattern.is_match(content) {
            warnings.push(format!("Document contains skip phrase: {}", label));
        }
    }

    if !has_numbered_steps(content) {
        warnings.push("Document appears to lack numbered test steps".to_string());
    }

    if !has_expected_results(content) {
        warnings.push("Document may be missing expected results section".to_string());
    }

    let physical = lower.contains("temperature") || lower.contains("pressure");
    if physical && !lower.contains("safety") && !lower.contains("caution") {
        warnings.push("Consider adding safety precautions for physical measurements".to_string());
    }

    warnings
}

/// Regulatory findings: absent recommended sections (case-insensitive, in
/// configured order), then a missing electronic signature clause.
pub fn compliance_warnings(content: &str, recommended: &[String]) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut warnings: Vec<String> = recommended
        .iter()
        .map(|s| s.trim())
        .filter(|section| !section.is_empty() && !lower.contains(&section.to_lowercase()))
        .map(|section| format!("Missing recommended section: {}", section))
        .collect();

    // 21 CFR Part 11
    if !lower.contains("electronic signature") {
        warnings.push(
            "Consider adding electronic signature requirements for FDA compliance".to_string(),
        );
    }

    warnings
}
