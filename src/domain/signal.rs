//! Signals: the monitored or controlled I/O points of a system under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use super::ProjectError;

/// Identifier of a signal, e.g. `SIG-TMP-01`.
///
/// Identifiers are matched verbatim (case-sensitive) against generated text,
/// so they must be non-empty and contain no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignalId(String);

impl SignalId {
    /// Create a signal id, rejecting empty or whitespace-containing values.
    pub fn new(id: impl Into<String>) -> Result<Self, ProjectError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ProjectError::EmptySignalId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ProjectError::MalformedSignalId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SignalId {
    type Error = ProjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SignalId> for String {
    fn from(id: SignalId) -> Self {
        id.0
    }
}

impl FromStr for SignalId {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Deref for SignalId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SignalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for SignalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SignalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Physical quantity or channel kind carried by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Temperature,
    Humidity,
    Pressure,
    Flow,
    Level,
    Ph,
    Conductivity,
    DissolvedOxygen,
    Analog,
    Digital,
    Communication,
}

impl SignalType {
    /// Human-readable label used in prompts and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Pressure => "Pressure",
            Self::Flow => "Flow",
            Self::Level => "Level",
            Self::Ph => "pH",
            Self::Conductivity => "Conductivity",
            Self::DissolvedOxygen => "Dissolved Oxygen",
            Self::Analog => "Analog",
            Self::Digital => "Digital",
            Self::Communication => "Communication",
        }
    }

    /// True for physical measurements that warrant safety precautions when tested.
    pub fn is_hazardous_measurement(&self) -> bool {
        matches!(self, Self::Temperature | Self::Pressure)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single monitored or controlled I/O point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// Range descriptor, e.g. `-40 to 80 C`
    #[serde(default)]
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Signal {
    pub fn new(id: SignalId, signal_type: SignalType, range: impl Into<String>) -> Self {
        Self {
            id,
            signal_type,
            range: range.into(),
            unit: None,
            accuracy: None,
            description: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_accuracy(mut self, accuracy: impl Into<String>) -> Self {
        self.accuracy = Some(accuracy.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
