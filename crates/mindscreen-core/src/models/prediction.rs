use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Confidence reported when the predictor returns no probabilities.
pub const DEFAULT_CONFIDENCE: f64 = 50.0;

/// The body returned by a prediction endpoint.
///
/// Only `prediction` is guaranteed. Anything else the service sends
/// alongside it is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<Vec<f64>>,
}

impl PredictionResult {
    /// Check the shape the rest of the system relies on: a binary label and
    /// probabilities in `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.prediction != 0 && self.prediction != 1 {
            return Err(CoreError::InvalidPrediction(self.prediction));
        }
        if let Some(probs) = &self.probability
            && probs.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 1.0)
        {
            return Err(CoreError::InvalidProbability);
        }
        Ok(())
    }

    pub fn is_positive(&self) -> bool {
        self.prediction == 1
    }

    /// Highest class probability as a percentage, if the service sent any.
    pub fn confidence(&self) -> Option<f64> {
        self.probability
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| p.iter().copied().fold(f64::MIN, f64::max) * 100.0)
    }

    pub fn confidence_or_default(&self) -> f64 {
        self.confidence().unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Confidence formatted to one decimal place, e.g. `"80.0%"`.
    pub fn confidence_label(&self) -> Option<String> {
        self.confidence().map(|c| format!("{c:.1}%"))
    }

    pub fn severity(&self) -> PredictionSeverity {
        PredictionSeverity::from_prediction(self)
    }
}

/// Severity band derived from a binary prediction and its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSeverity {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl PredictionSeverity {
    /// Negative predictions are always minimal. Positive ones are banded by
    /// confidence: 80 and up is severe, 60 and up moderate, otherwise mild.
    pub fn from_prediction(result: &PredictionResult) -> Self {
        if !result.is_positive() {
            return PredictionSeverity::Minimal;
        }
        let confidence = result.confidence_or_default();
        if confidence >= 80.0 {
            PredictionSeverity::Severe
        } else if confidence >= 60.0 {
            PredictionSeverity::Moderate
        } else {
            PredictionSeverity::Mild
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSeverity::Minimal => "minimal",
            PredictionSeverity::Mild => "mild",
            PredictionSeverity::Moderate => "moderate",
            PredictionSeverity::Severe => "severe",
        }
    }
}

impl fmt::Display for PredictionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
