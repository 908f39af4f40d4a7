use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which condition a local-factors assessment predicts.
///
/// Resolved once when a wizard is built; it selects the endpoint, the
/// mutually exclusive field, and the labels shown for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Anxiety,
    Depression,
}

impl AssessmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentKind::Anxiety => "anxiety",
            AssessmentKind::Depression => "depression",
        }
    }

    /// Capitalized name used in headings, e.g. "Anxiety Assessment".
    pub fn title(&self) -> &'static str {
        match self {
            AssessmentKind::Anxiety => "Anxiety",
            AssessmentKind::Depression => "Depression",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssessmentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anxiety" => Ok(AssessmentKind::Anxiety),
            "depression" => Ok(AssessmentKind::Depression),
            other => Err(CoreError::UnknownAssessmentKind(other.to_string())),
        }
    }
}
