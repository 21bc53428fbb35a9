//! Validation properties over realistic procedures

use crate::support::builders::ProjectBuilder;
use crate::support::fixtures::load_fixture;

use testproc::domain::sample_project;
use testproc::validation::{validate_all, MatchMode, ValidationConfig, Validator, DEFAULT_REQUIRED_SECTIONS};

fn with_sections(body: &str) -> String {
    format!(
        "## Purpose\n\n## Procedure\n1. {}\n\n## Expected Result\nPASS\n\n## Sign-Off\n",
        body
    )
}

#[test]
fn test_complete_fixture_passes() {
    let project = sample_project().unwrap();
    let result = validate_all(&load_fixture("complete_procedure"), &project);
    assert!(result.passed(), "{:?}", result.errors());
    assert_eq!(result.coverage_pct(), 100.0);
    assert!(result.missing_signals().is_empty());
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
}

#[test]
fn test_partial_fixture_reports_gaps() {
    let project = sample_project().unwrap();
    let result = validate_all(&load_fixture("partial_procedure"), &project);
    assert!(!result.passed());
    assert_eq!(result.coverage_pct(), 50.0);
    assert_eq!(result.missing_signals().len(), 1);
    assert_eq!(result.missing_signals()[0].as_str(), "SIG-HUM-01");
    assert_eq!(result.errors(), &["Missing required section: Sign-Off".to_string()]);
    assert!(result
        .warnings()
        .contains(&"Document contains placeholder text: TBD".to_string()));
    assert!(result
        .warnings()
        .contains(&"Consider adding safety precautions for physical measurements".to_string()));
    assert!(result
        .warnings()
        .contains(&"Missing recommended section: equipment".to_string()));
    assert!(result
        .warnings()
        .contains(&"Consider adding electronic signature requirements for FDA compliance".to_string()));
}

#[test]
fn test_removing_one_mention_drops_coverage_by_one_share() {
    let ids = ["SIG-A", "SIG-B", "SIG-C", "SIG-D"];
    let project = ProjectBuilder::new("P-1").with_signals(&ids).build();

    let all = validate_all(&with_sections(&ids.join(" ")), &project);
    assert_eq!(all.coverage_pct(), 100.0);
    assert!(all.passed());

    for skipped in ids {
        let mentioned: Vec<&str> = ids.iter().copied().filter(|id| *id != skipped).collect();
        let result = validate_all(&with_sections(&mentioned.join(" ")), &project);
        assert_eq!(result.missing_signals().len(), 1);
        assert_eq!(result.missing_signals()[0].as_str(), skipped);
        assert_eq!(result.coverage_pct(), 75.0);
        assert!(!result.passed());
    }
}

#[test]
fn test_missing_signals_follow_project_order() {
    let project = ProjectBuilder::new("P-1")
        .with_signals(&["SIG-Z", "SIG-A", "SIG-M"])
        .build();
    let result = validate_all("nothing", &project);
    let missing: Vec<&str> = result.missing_signals().iter().map(|s| s.as_str()).collect();
    assert_eq!(missing, vec!["SIG-Z", "SIG-A", "SIG-M"]);
    assert_eq!(result.coverage_pct(), 0.0);
}

#[test]
fn test_coverage_rounds_to_one_decimal() {
    let project = ProjectBuilder::new("P-1")
        .with_signals(&["S1", "S2", "S3", "S4", "S5", "S6"])
        .build();
    let result = validate_all("S1", &project);
    assert_eq!(result.coverage_pct(), 16.7);
}

#[test]
fn test_token_boundary_default_and_substring_override() {
    let project = ProjectBuilder::new("P-1").with_signals(&["SIG-TMP-01"]).build();
    let content = with_sections("Read SIG-TMP-010");

    let token = validate_all(&content, &project);
    assert_eq!(token.missing_signals().len(), 1);
    assert!(!token.passed());

    let substring = Validator::new(ValidationConfig {
        match_mode: MatchMode::Substring,
        ..ValidationConfig::default()
    })
    .validate(&content, &project);
    assert!(substring.passed());
}

#[test]
fn test_custom_required_sections() {
    let project = ProjectBuilder::new("P-1").with_signals(&["SIG-A"]).build();
    let validator = Validator::new(ValidationConfig {
        required_sections: vec!["Scope".to_string(), "Witness".to_string()],
        ..ValidationConfig::default()
    });
    let result = validator.validate("SIG-A\n## Scope\n1. x\nexpected", &project);
    assert_eq!(result.errors(), &["Missing required section: Witness".to_string()]);
    assert_eq!(DEFAULT_REQUIRED_SECTIONS.len(), 4);
}

#[test]
fn test_result_serializes_core_fields() {
    let project = ProjectBuilder::new("P-1").with_signals(&["SIG-TMP-01", "SIG-PRS-02"]).build();
    let result = validate_all("Test covers SIG-TMP-01 only.", &project);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["passed"], false);
    assert_eq!(json["coverage_pct"], 50.0);
    assert_eq!(json["missing_signals"], serde_json::json!(["SIG-PRS-02"]));
    assert!(json["errors"].is_array());
}
