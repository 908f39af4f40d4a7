use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a field is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Yes/no, stored as 0/1.
    Checkbox,
    /// Free numeric entry within a range.
    Number,
    /// One of a fixed list of labelled options.
    Select,
    /// Ordinal rating (e.g. PHQ-9 items, 0–3).
    Rating,
}

/// Defines the valid range for a field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl FieldRange {
    pub const BINARY: FieldRange = FieldRange {
        min: 0.0,
        max: 1.0,
        step: Some(1.0),
    };

    pub const fn integer(min: f64, max: f64) -> Self {
        FieldRange {
            min,
            max,
            step: Some(1.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() || value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// A labelled choice for select and rating fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: i64,
    pub label: String,
}

/// A single input within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub range: FieldRange,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldSpec {
    pub fn checkbox(id: &str, label: &str) -> Self {
        FieldSpec {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Checkbox,
            range: FieldRange::BINARY,
            options: Vec::new(),
        }
    }

    pub fn number(id: &str, label: &str, range: FieldRange) -> Self {
        FieldSpec {
            id: id.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number,
            range,
            options: Vec::new(),
        }
    }

    /// A select or rating field whose range spans its option values.
    pub fn choice(id: &str, label: &str, kind: FieldKind, options: &[(i64, &str)]) -> Self {
        let min = options.iter().map(|(v, _)| *v).min().unwrap_or(0);
        let max = options.iter().map(|(v, _)| *v).max().unwrap_or(0);
        FieldSpec {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            range: FieldRange::integer(min as f64, max as f64),
            options: options
                .iter()
                .map(|(value, label)| FieldOption {
                    value: *value,
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    pub fn option_label(&self, value: i64) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// An ordered group of fields presented together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub description: Option<String>,
}

impl Section {
    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// A value supplied for one field, used for generic validation and review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field_id: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field_id: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field_id: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field_id: field_id.to_string(),
            message: message.into(),
        }
    }
}
