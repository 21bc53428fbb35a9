//! Config loading from the filesystem

use crate::support::fixtures::write_file;

use std::fs;
use tempfile::TempDir;
use testproc::config::{Config, PROJECT_CONFIG_PATH};
use testproc::provider::{Provider, ProviderKind};
use testproc::validation::MatchMode;

#[test]
fn test_project_config_drives_provider_and_validation() {
    let tmp = TempDir::new().unwrap();
    let project_config = tmp.path().join(PROJECT_CONFIG_PATH);
    fs::create_dir_all(project_config.parent().unwrap()).unwrap();
    fs::write(
        &project_config,
        r#"---
provider:
  kind: live
  live:
    endpoint: http://localhost:8080/v1
    timeout_secs: 10
validation:
  match_mode: substring
---

Notes about this project's config.
"#,
    )
    .unwrap();

    let config = Config::load_merged_from(None, &project_config).unwrap();
    assert_eq!(config.provider.kind, ProviderKind::Live);
    assert_eq!(config.validation.match_mode, MatchMode::Substring);

    let provider = Provider::from_config(&config.provider, Some("sk-test".to_string())).unwrap();
    assert_eq!(provider.kind(), ProviderKind::Live);

    // Live provider without any key is a configuration error
    assert!(Provider::from_config(&config.provider, None).is_err());
}

#[test]
fn test_invalid_global_config_fails_loading() {
    let tmp = TempDir::new().unwrap();
    let global = write_file(
        tmp.path(),
        "global.md",
        "---\nprovider:\n  live:\n    max_tokens: 99999\n---\n",
    );
    let err = Config::load_merged_from(Some(&global), &tmp.path().join("missing.md")).unwrap_err();
    assert!(format!("{:#}", err).contains("max_tokens"));
}

#[test]
fn test_config_without_frontmatter_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(tmp.path(), "config.md", "# Only markdown\n");
    assert!(Config::load_merged_from(None, &path).is_err());
}
