use serde::{Deserialize, Serialize};

/// Where a recommendation list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOrigin {
    /// Parsed from the remote generator's text.
    Generated,
    /// Built-in list used when the generator was unreachable or returned
    /// something unusable.
    Fallback,
}

/// Wellness suggestions shown beneath a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub items: Vec<String>,
    pub origin: RecommendationOrigin,
    /// Severity wording the prompt was built from (e.g. "moderate").
    pub severity: String,
    /// Prediction confidence in percent, when the set came from a model
    /// prediction rather than a questionnaire score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl RecommendationSet {
    pub fn is_fallback(&self) -> bool {
        self.origin == RecommendationOrigin::Fallback
    }
}
