//! Signal coverage: which project signals a generated text mentions.
//!
//! Matching is purely syntactic and case-sensitive. No normalisation is
//! applied to either side, so the same text always yields the same coverage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Signal, SignalId};

/// How a signal id must appear in the text to count as covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The id must appear as a whole token: the characters on either side
    /// of the occurrence must not be letters, digits or `_`. A mention of
    /// `SIG-TMP-010` does not cover `SIG-TMP-01`.
    #[default]
    Token,
    /// Any occurrence of the id as a substring counts.
    Substring,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Token => write!(f, "token"),
            MatchMode::Substring => write!(f, "substring"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token" => Ok(Self::Token),
            "substring" => Ok(Self::Substring),
            _ => Err(format!(
                "Unknown match mode '{}'. Valid modes: token, substring",
                s
            )),
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Check whether `id` is mentioned in `content` under the given mode.
pub fn mentions(content: &str, id: &str, mode: MatchMode) -> bool {
    if id.is_empty() {
        return false;
    }

    match mode {
        MatchMode::Substring => content.contains(id),
        MatchMode::Token => {
            // Resume one character past each rejected start so overlapping
            // occurrences are still considered.
            let mut from = 0;
            while let Some(offset) = content[from..].find(id) {
                let start = from + offset;
                let end = start + id.len();
                let before = content[..start].chars().next_back();
                let after = content[end..].chars().next();
                if !before.is_some_and(is_token_char) && !after.is_some_and(is_token_char) {
                    return true;
                }
                from = start + content[start..].chars().next().map_or(1, char::len_utf8);
            }
            false
        }
    }
}

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Split of a project's signals into covered and missing, both in project order.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    covered: Vec<SignalId>,
    missing: Vec<SignalId>,
}

impl Coverage {
    pub fn compute(content: &str, signals: &[Signal], mode: MatchMode) -> Self {
        let (covered, missing): (Vec<&Signal>, Vec<&Signal>) = signals
            .iter()
            .partition(|signal| mentions(content, signal.id.as_str(), mode));

        Self {
            covered: covered.into_iter().map(|s| s.id.clone()).collect(),
            missing: missing.into_iter().map(|s| s.id.clone()).collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.covered.len() + self.missing.len()
    }

    pub fn covered(&self) -> &[SignalId] {
        &self.covered
    }

    pub fn missing(&self) -> &[SignalId] {
        &self.missing
    }

    pub fn into_parts(self) -> (Vec<SignalId>, Vec<SignalId>) {
        (self.covered, self.missing)
    }

    /// Covered share of all signals as a percentage rounded to one decimal.
    ///
    /// A project without signals has nothing left uncovered and reports 100.0.
    pub fn percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 100.0;
        }
        round_to_tenth(self.covered.len() as f64 / total as f64 * 100.0)
    }
}
