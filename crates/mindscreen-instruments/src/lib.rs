//! mindscreen-instruments
//!
//! Questionnaire definitions and the state machines that drive them. Pure
//! logic, no network dependency. Defines the sections, fields, and scoring
//! rules for each supported instrument, the PHQ-9 session, and the
//! sectioned assessment wizard.

pub mod error;
pub mod fields;
pub mod instruments;
pub mod session;
pub mod wizard;

use fields::{FieldValue, Section, ValidationError};

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9", "student").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// The sections and fields this instrument asks for, in order.
    fn sections(&self) -> &[Section];

    /// Validate a set of field values against this instrument's ranges.
    fn validate_values(&self, values: &[FieldValue]) -> Vec<ValidationError> {
        let all_fields: Vec<_> = self.sections().iter().flat_map(|s| &s.fields).collect();

        let mut errors = Vec::new();
        for entry in values {
            match all_fields.iter().find(|f| f.id == entry.field_id) {
                Some(field) if !field.range.contains(entry.value) => {
                    errors.push(ValidationError::new(
                        &entry.field_id,
                        format!(
                            "{}: {} value {} is outside range [{}, {}]",
                            self.name(),
                            field.label,
                            entry.value,
                            field.range.min,
                            field.range.max,
                        ),
                    ));
                }
                Some(_) => {}
                None => errors.push(ValidationError::new(
                    &entry.field_id,
                    format!("{}: unknown field '{}'", self.name(), entry.field_id),
                )),
            }
        }
        errors
    }

    /// Format values as a plain-text review, grouped by section.
    fn to_summary(&self, values: &[FieldValue]) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for section in self.sections() {
            output.push_str(&format!("### {}\n", section.title));
            for field in &section.fields {
                if let Some(entry) = values.iter().find(|e| e.field_id == field.id) {
                    let shown = field
                        .option_label(entry.value as i64)
                        .map(str::to_string)
                        .unwrap_or_else(|| entry.value.to_string());
                    output.push_str(&format!("- {}: {}\n", field.label, shown));
                }
            }
            output.push('\n');
        }
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::student::StudentScreening),
        Box::new(instruments::local_factors::LocalFactors::anxiety()),
        Box::new(instruments::local_factors::LocalFactors::depression()),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Result<Box<dyn Instrument>, error::InstrumentError> {
    all_instruments()
        .into_iter()
        .find(|i| i.id() == id)
        .ok_or_else(|| error::InstrumentError::UnknownInstrument(id.to_string()))
}
