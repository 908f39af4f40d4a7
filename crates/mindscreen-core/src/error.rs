use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown assessment kind: {0}")]
    UnknownAssessmentKind(String),

    #[error("prediction must be 0 or 1, got {0}")]
    InvalidPrediction(i64),

    #[error("probability values must be finite and within [0, 1]")]
    InvalidProbability,
}
