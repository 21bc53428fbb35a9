//! Project definitions: the signal and requirement schema a generated
//! test procedure is checked against.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{Requirement, Signal, SignalId};

/// Malformed project input. Always fatal, raised before any validation runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectError {
    #[error("Project ID is required")]
    EmptyProjectId,
    #[error("System name is required")]
    EmptySystemName,
    #[error("Signal ID cannot be empty")]
    EmptySignalId,
    #[error("Invalid signal ID '{0}': must not contain whitespace")]
    MalformedSignalId(String),
    #[error("Requirement ID cannot be empty")]
    EmptyRequirementId,
    #[error("Duplicate signal ID: {0}")]
    DuplicateSignal(SignalId),
    #[error("Duplicate requirement ID: {0}")]
    DuplicateRequirement(String),
    #[error("Requirement {requirement} references unknown signal {signal}")]
    UnknownSignalReference {
        requirement: String,
        signal: SignalId,
    },
}

/// Kind of acceptance or qualification document to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestType {
    #[default]
    #[serde(rename = "FAT")]
    Fat,
    #[serde(rename = "SAT")]
    Sat,
    #[serde(rename = "IQ")]
    Iq,
    #[serde(rename = "OQ")]
    Oq,
}

impl TestType {
    pub const ALL: [TestType; 4] = [TestType::Fat, TestType::Sat, TestType::Iq, TestType::Oq];

    /// Short code, e.g. `FAT`
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fat => "FAT",
            Self::Sat => "SAT",
            Self::Iq => "IQ",
            Self::Oq => "OQ",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Fat => "Factory Acceptance Test",
            Self::Sat => "Site Acceptance Test",
            Self::Iq => "Installation Qualification",
            Self::Oq => "Operational Qualification",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FAT" => Ok(Self::Fat),
            "SAT" => Ok(Self::Sat),
            "IQ" => Ok(Self::Iq),
            "OQ" => Ok(Self::Oq),
            _ => Err(format!(
                "Unknown test type '{}'. Valid types: FAT, SAT, IQ, OQ",
                s
            )),
        }
    }
}

/// Complete project description for one generation request.
///
/// Constructed once from user input and read-only afterwards. Every
/// construction path, including deserialization, goes through
/// [`Project::new`], so an existing `Project` always satisfies:
/// - project id and system name are non-empty
/// - signal ids are unique
/// - requirement ids are unique
/// - every signal a requirement references exists in the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProjectRecord")]
pub struct Project {
    project_id: String,
    system: String,
    environment: String,
    signals: Vec<Signal>,
    requirements: Vec<Requirement>,
}

#[derive(Debug, Deserialize)]
struct ProjectRecord {
    project_id: String,
    system: String,
    #[serde(default)]
    environment: String,
    #[serde(default)]
    signals: Vec<Signal>,
    #[serde(default)]
    requirements: Vec<Requirement>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = ProjectError;

    fn try_from(record: ProjectRecord) -> std::result::Result<Self, Self::Error> {
        Project::new(
            record.project_id,
            record.system,
            record.environment,
            record.signals,
            record.requirements,
        )
    }
}

impl Project {
    /// Build a project, checking every invariant up front.
    ///
    /// Checks run in a fixed order (identity, signals, requirements,
    /// references) and the first violation is returned.
    pub fn new(
        project_id: impl Into<String>,
        system: impl Into<String>,
        environment: impl Into<String>,
        signals: Vec<Signal>,
        requirements: Vec<Requirement>,
    ) -> std::result::Result<Self, ProjectError> {
        let project_id = project_id.into();
        let system = system.into();

        if project_id.trim().is_empty() {
            return Err(ProjectError::EmptyProjectId);
        }
        if system.trim().is_empty() {
            return Err(ProjectError::EmptySystemName);
        }

        let mut signal_ids = HashSet::with_capacity(signals.len());
        for signal in &signals {
            if !signal_ids.insert(signal.id.as_str()) {
                return Err(ProjectError::DuplicateSignal(signal.id.clone()));
            }
        }

        let mut requirement_ids = HashSet::with_capacity(requirements.len());
        for requirement in &requirements {
            if !requirement_ids.insert(requirement.id()) {
                return Err(ProjectError::DuplicateRequirement(
                    requirement.id().to_string(),
                ));
            }
        }

        for requirement in &requirements {
            if let Some(unknown) = requirement
                .signals()
                .iter()
                .find(|id| !signal_ids.contains(id.as_str()))
            {
                return Err(ProjectError::UnknownSignalReference {
                    requirement: requirement.id().to_string(),
                    signal: unknown.clone(),
                });
            }
        }

        Ok(Self {
            project_id,
            system,
            environment: environment.into(),
            signals,
            requirements,
        })
    }

    /// Load a project from a JSON or YAML file (chosen by extension).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project from {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&content)
                .with_context(|| format!("Invalid project file {}", path.display()))
        } else {
            Self::from_json(&content)
                .with_context(|| format!("Invalid project file {}", path.display()))
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse project JSON")
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse project YAML")
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Signals in their declared order
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    pub fn signal(&self, id: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.id == id)
    }

    /// Requirements that reference the given signal
    pub fn requirements_for(&self, id: &SignalId) -> impl Iterator<Item = &Requirement> {
        let id = id.clone();
        self.requirements
            .iter()
            .filter(move |r| r.signals().contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalType;

    fn signal(id: &str) -> Signal {
        Signal::new(SignalId::new(id).unwrap(), SignalType::Temperature, "0-100 C")
    }

    #[test]
    fn test_project_accepts_valid_input() {
        let project = Project::new(
            "P-1",
            "Cooling System",
            "Cleanroom",
            vec![signal("SIG-TMP-01"), signal("SIG-TMP-02")],
            vec![Requirement::new("REQ-01", "Reads correctly")
                .unwrap()
                .with_signals([SignalId::new("SIG-TMP-01").unwrap()])],
        )
        .unwrap();
        assert_eq!(project.signal_count(), 2);
        assert_eq!(project.requirement_count(), 1);
        assert!(project.signal("SIG-TMP-02").is_some());
    }

    #[test]
    fn test_project_rejects_duplicate_signals() {
        let err = Project::new(
            "P-1",
            "Cooling System",
            "",
            vec![signal("SIG-TMP-01"), signal("SIG-TMP-01")],
            vec![],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProjectError::DuplicateSignal(SignalId::new("SIG-TMP-01").unwrap())
        );
        assert_eq!(err.to_string(), "Duplicate signal ID: SIG-TMP-01");
    }

    #[test]
    fn test_project_rejects_duplicate_requirements() {
        let err = Project::new(
            "P-1",
            "Cooling System",
            "",
            vec![signal("SIG-TMP-01")],
            vec![
                Requirement::new("REQ-01", "a").unwrap(),
                Requirement::new("REQ-01", "b").unwrap(),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ProjectError::DuplicateRequirement("REQ-01".to_string()));
    }

    #[test]
    fn test_project_rejects_dangling_signal_reference() {
        let err = Project::new(
            "P-1",
            "Cooling System",
            "",
            vec![signal("SIG-TMP-01")],
            vec![Requirement::new("REQ-01", "a")
                .unwrap()
                .with_signals([SignalId::new("SIG-PRS-09").unwrap()])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProjectError::UnknownSignalReference { ref requirement, ref signal }
                if requirement == "REQ-01" && signal == "SIG-PRS-09"
        ));
    }

    #[test]
    fn test_project_rejects_blank_identity() {
        assert_eq!(
            Project::new(" ", "Sys", "", vec![], vec![]).unwrap_err(),
            ProjectError::EmptyProjectId
        );
        assert_eq!(
            Project::new("P-1", "", "", vec![], vec![]).unwrap_err(),
            ProjectError::EmptySystemName
        );
    }

    #[test]
    fn test_project_allows_zero_signals() {
        let project = Project::new("P-1", "Sys", "", vec![], vec![]).unwrap();
        assert_eq!(project.signal_count(), 0);
    }

    #[test]
    fn test_project_from_json_runs_invariants() {
        let json = r#"{
            "project_id": "P-2026-PILOT",
            "system": "Indigo500 Transmitter",
            "signals": [
                {"id": "SIG-TMP-01", "type": "TEMPERATURE", "range": "-40 to 80 C"},
                {"id": "SIG-TMP-01", "type": "HUMIDITY", "range": "0 to 100 %RH"}
            ]
        }"#;
        let err = Project::from_json(json).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate signal ID: SIG-TMP-01"));
    }

    #[test]
    fn test_project_from_yaml() {
        let yaml = r#"
project_id: P-7
system: Boiler
environment: Plant room
signals:
  - id: SIG-PRS-01
    type: PRESSURE
    range: 0 to 10 bar
requirements:
  - id: REQ-01
    text: Relief valve opens at 9 bar
    priority: HIGH
    signals: [SIG-PRS-01]
"#;
        let project = Project::from_yaml(yaml).unwrap();
        assert_eq!(project.environment(), "Plant room");
        let id = SignalId::new("SIG-PRS-01").unwrap();
        assert_eq!(project.requirements_for(&id).count(), 1);
    }

    #[test]
    fn test_test_type_parse_is_case_insensitive() {
        assert_eq!("sat".parse::<TestType>().unwrap(), TestType::Sat);
        assert!("XYZ".parse::<TestType>().is_err());
        assert_eq!(TestType::Iq.title(), "Installation Qualification");
    }
}
