use thiserror::Error;

use crate::fields::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{} field(s) failed validation", errors.len())]
    InvalidForm { errors: Vec<ValidationError> },

    #[error("please answer all questions (missing: {})", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    #[error("unknown field '{field_id}' for instrument '{instrument_id}'")]
    UnknownField {
        instrument_id: String,
        field_id: String,
    },

    #[error("field '{field_id}' is not part of the {kind} assessment")]
    InactiveField { field_id: String, kind: String },

    #[error("question number {0} is out of range (expected 1-9)")]
    UnknownQuestion(usize),

    #[error("section index {index} is out of range ({count} sections)")]
    UnknownSection { index: usize, count: usize },

    #[error("submission is only possible from the last section")]
    NotAtLastSection,

    #[error("questionnaire has already been submitted")]
    AlreadySubmitted,

    #[error("no prediction result to base recommendations on")]
    NoResult,
}
