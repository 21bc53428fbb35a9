//! CLI behaviour, driven through the built binary with the mock provider

use crate::common::{run_testproc, stderr, stdout};
use crate::support::fixtures::{fixture_path, write_file};

use std::fs;
use tempfile::TempDir;
use testproc::domain::SAMPLE_PROJECT_JSON;

fn sample_project_file(dir: &std::path::Path) -> String {
    write_file(dir, "project.json", SAMPLE_PROJECT_JSON)
        .display()
        .to_string()
}

#[test]
fn test_sample_prints_valid_project() {
    let tmp = TempDir::new().unwrap();
    let output = run_testproc(tmp.path(), &["sample"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["project_id"], "P-2026-PILOT");
}

#[test]
fn test_check_reports_project_summary() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let output = run_testproc(tmp.path(), &["check", &project]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("2 signals, 2 requirements"));
}

#[test]
fn test_check_rejects_duplicate_signals() {
    let tmp = TempDir::new().unwrap();
    let project = write_file(
        tmp.path(),
        "dup.yaml",
        r#"project_id: P-1
system: Skid
signals:
  - { id: SIG-A, type: FLOW, range: 0-10 }
  - { id: SIG-A, type: FLOW, range: 0-10 }
"#,
    );
    let output = run_testproc(tmp.path(), &["check", project.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Duplicate signal ID: SIG-A"));
}

#[test]
fn test_validate_passing_fixture_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let content = fixture_path("complete_procedure");
    let output = run_testproc(tmp.path(), &["validate", &project, content.to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["passed"], true);
    assert_eq!(json["coverage_pct"], 100.0);
}

#[test]
fn test_validate_failing_fixture_exits_two() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let content = fixture_path("partial_procedure");
    let output = run_testproc(tmp.path(), &["validate", &project, content.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("50.0%"));
    assert!(text.contains("SIG-HUM-01"));
}

#[test]
fn test_validate_strict_promotes_warnings() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let content = fixture_path("partial_procedure");
    let output = run_testproc(
        tmp.path(),
        &["validate", &project, content.to_str().unwrap(), "--json", "--strict"],
    );
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let errors = json["errors"].as_array().unwrap();
    assert!(errors
        .iter()
        .any(|e| e == "STRICT: Document contains placeholder text: TBD"));
}

#[test]
fn test_generate_with_mock_writes_html() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let output = run_testproc(tmp.path(), &["generate", &project, "--test-type", "SAT", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["validation"]["passed"], true);
    assert_eq!(json["metadata"]["provider"], "mock");
    assert_eq!(json["metadata"]["test_type"], "SAT");

    let path = tmp.path().join("output").join("P-2026-PILOT_SAT.html");
    let html = fs::read_to_string(path).unwrap();
    assert!(html.contains("Compliance Annex"));
}

#[test]
fn test_generate_markdown_to_custom_dir() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let out = tmp.path().join("docs");
    let output = run_testproc(
        tmp.path(),
        &[
            "generate",
            &project,
            "--format",
            "markdown",
            "--out",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let markdown = fs::read_to_string(out.join("P-2026-PILOT_FAT.md")).unwrap();
    assert!(markdown.contains("## Sign-Off"));
    assert!(markdown.contains("## Compliance Annex"));
}

#[test]
fn test_generate_refuses_failed_document() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let config = write_file(
        tmp.path(),
        "strict.md",
        "---\nvalidation:\n  required_sections: [Purpose, Witness Statement]\n---\n",
    );
    let output = run_testproc(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "generate", &project],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("document not rendered"));
    assert!(!tmp.path().join("output").exists());

    let output = run_testproc(
        tmp.path(),
        &["--config", config.to_str().unwrap(), "generate", &project, "--allow-failed"],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(tmp.path().join("output").join("P-2026-PILOT_FAT.html").exists());
}

#[test]
fn test_generate_live_without_key_fails() {
    let tmp = TempDir::new().unwrap();
    let project = sample_project_file(tmp.path());
    let output = run_testproc(tmp.path(), &["generate", &project, "--provider", "live"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("OPENAI_API_KEY"));
}

#[test]
fn test_prompts_lists_versions() {
    let tmp = TempDir::new().unwrap();
    let output = run_testproc(tmp.path(), &["prompts"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("v1.0"));
    assert!(text.contains("v1.2"));
    assert!(text.contains("(default)"));
}

#[test]
fn test_completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    let output = run_testproc(tmp.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("testproc"));
}
