//! System requirements that generated test procedures must trace back to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ProjectError, SignalId};

/// Requirement priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
            Priority::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A system requirement, optionally tied to the signals that verify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RequirementRecord")]
pub struct Requirement {
    id: String,
    text: String,
    priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    signals: Vec<SignalId>,
}

/// Unvalidated wire form of a [`Requirement`]
#[derive(Debug, Deserialize)]
struct RequirementRecord {
    id: String,
    text: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    signals: Vec<SignalId>,
}

impl TryFrom<RequirementRecord> for Requirement {
    type Error = ProjectError;

    fn try_from(record: RequirementRecord) -> Result<Self, Self::Error> {
        let mut requirement = Requirement::new(record.id, record.text)?
            .with_priority(record.priority)
            .with_signals(record.signals);
        requirement.category = record.category;
        Ok(requirement)
    }
}

impl Requirement {
    /// Create a requirement; the id must not be empty.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Result<Self, ProjectError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProjectError::EmptyRequirementId);
        }
        Ok(Self {
            id,
            text: text.into(),
            priority: Priority::default(),
            category: None,
            signals: Vec::new(),
        })
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_signals(mut self, signals: impl IntoIterator<Item = SignalId>) -> Self {
        self.signals = signals.into_iter().collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Signals this requirement is verified through
    pub fn signals(&self) -> &[SignalId] {
        &self.signals
    }
}
