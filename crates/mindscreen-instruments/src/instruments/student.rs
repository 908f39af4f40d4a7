//! Student depression screening.
//!
//! Eight lifestyle and academic fields sent to the student predictor.
//! Sliders default to 0; age, CGPA, hours, diet and the suicidal-thoughts
//! question must be filled in before the form can be submitted.

use serde::{Deserialize, Serialize};

use crate::Instrument;
use crate::error::InstrumentError;
use crate::fields::{FieldKind, FieldRange, FieldSpec, Section, ValidationError};

const AGE: FieldRange = FieldRange::integer(16.0, 100.0);
const CGPA: FieldRange = FieldRange {
    min: 0.0,
    max: 10.0,
    step: None,
};
const HOURS: FieldRange = FieldRange::integer(0.0, 168.0);
const SLIDER: FieldRange = FieldRange::integer(0.0, 5.0);

pub const CRISIS_RESOURCES: &str = "If you're experiencing suicidal thoughts, please reach out \
for help:\n• National Suicide Prevention Lifeline: 988 or 1-800-273-8255\n• Crisis Text Line: \
Text HOME to 741741";

/// Raw answers as collected from the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentForm {
    pub age: Option<i64>,
    pub academic_pressure: i64,
    pub cgpa: Option<f64>,
    pub study_satisfaction: i64,
    pub dietary_habits: Option<i64>,
    pub suicidal_thoughts: Option<bool>,
    pub work_study_hours: Option<i64>,
    pub financial_stress: i64,
}

/// Request body for the student predictor. Field names match the
/// service's training columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPredictionRequest {
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Academic_Pressure")]
    pub academic_pressure: i64,
    #[serde(rename = "Cgpa")]
    pub cgpa: f64,
    #[serde(rename = "Study_Satisfaction")]
    pub study_satisfaction: i64,
    #[serde(rename = "Dietary_Habits")]
    pub dietary_habits: i64,
    #[serde(rename = "Suicidal_Thoughts")]
    pub suicidal_thoughts: i64,
    #[serde(rename = "WrkStdy_Hours")]
    pub work_study_hours: i64,
    #[serde(rename = "Financial_Stress")]
    pub financial_stress: i64,
}

impl StudentPredictionRequest {
    /// A "yes" to the suicidal-thoughts question always surfaces crisis
    /// resources, whatever the prediction says.
    pub fn reports_suicidal_thoughts(&self) -> bool {
        self.suicidal_thoughts == 1
    }
}

impl StudentForm {
    /// Check every field and build the request body.
    ///
    /// All problems are collected, so the caller can show them together.
    pub fn validate(&self) -> Result<StudentPredictionRequest, InstrumentError> {
        let mut errors = Vec::new();

        let age = required(&mut errors, "Age", self.age, "Age is required", |v| {
            AGE.contains(v as f64)
                .then_some(v)
                .ok_or("Please enter a valid age between 16 and 100")
        });
        let cgpa = required(&mut errors, "Cgpa", self.cgpa, "CGPA is required", |v| {
            CGPA.contains(v)
                .then_some(v)
                .ok_or("Please enter a valid CGPA between 0.0 and 10.0")
        });
        let hours = required(
            &mut errors,
            "WrkStdy_Hours",
            self.work_study_hours,
            "Weekly work/study hours is required",
            |v| {
                HOURS
                    .contains(v as f64)
                    .then_some(v)
                    .ok_or("Please enter valid hours between 0 and 168")
            },
        );
        let diet = required(
            &mut errors,
            "Dietary_Habits",
            self.dietary_habits,
            "Please select your dietary habits",
            |v| (0..=2).contains(&v).then_some(v).ok_or("Please select your dietary habits"),
        );
        let suicidal = required(
            &mut errors,
            "Suicidal_Thoughts",
            self.suicidal_thoughts,
            "This field is required",
            |v| Ok(i64::from(v)),
        );

        for (id, value) in [
            ("Academic_Pressure", self.academic_pressure),
            ("Study_Satisfaction", self.study_satisfaction),
            ("Financial_Stress", self.financial_stress),
        ] {
            if !SLIDER.contains(value as f64) {
                errors.push(ValidationError::new(id, format!("{id} must be between 0 and 5")));
            }
        }

        match (age, cgpa, hours, diet, suicidal) {
            (Some(age), Some(cgpa), Some(hours), Some(diet), Some(suicidal)) if errors.is_empty() => {
                Ok(StudentPredictionRequest {
                    age,
                    academic_pressure: self.academic_pressure,
                    cgpa,
                    study_satisfaction: self.study_satisfaction,
                    dietary_habits: diet,
                    suicidal_thoughts: suicidal,
                    work_study_hours: hours,
                    financial_stress: self.financial_stress,
                })
            }
            _ => Err(InstrumentError::InvalidForm { errors }),
        }
    }
}

fn required<T: Copy, U>(
    errors: &mut Vec<ValidationError>,
    field_id: &str,
    value: Option<T>,
    missing: &str,
    check: impl FnOnce(T) -> Result<U, &'static str>,
) -> Option<U> {
    let Some(value) = value else {
        errors.push(ValidationError::new(field_id, missing));
        return None;
    };
    match check(value) {
        Ok(v) => Some(v),
        Err(message) => {
            errors.push(ValidationError::new(field_id, message));
            None
        }
    }
}

pub struct StudentScreening;

impl Instrument for StudentScreening {
    fn id(&self) -> &str {
        "student"
    }

    fn name(&self) -> &str {
        "Student Depression Screening"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![
                Section {
                    id: "academic".to_string(),
                    title: "Academic Life".to_string(),
                    fields: vec![
                        FieldSpec::number("Age", "Age", AGE),
                        FieldSpec::number("Academic_Pressure", "Academic Pressure (0-5)", SLIDER),
                        FieldSpec::number("Cgpa", "CGPA (0.0-10.0)", CGPA),
                        FieldSpec::number("Study_Satisfaction", "Study Satisfaction (0-5)", SLIDER),
                        FieldSpec::number("WrkStdy_Hours", "Weekly Work/Study Hours", HOURS),
                    ],
                    description: None,
                },
                Section {
                    id: "wellbeing".to_string(),
                    title: "Wellbeing".to_string(),
                    fields: vec![
                        FieldSpec::choice(
                            "Dietary_Habits",
                            "Dietary Habits",
                            FieldKind::Select,
                            &[(0, "Unhealthy"), (1, "Moderate"), (2, "Healthy")],
                        ),
                        FieldSpec::choice(
                            "Suicidal_Thoughts",
                            "Have you ever had suicidal thoughts?",
                            FieldKind::Select,
                            &[(0, "No"), (1, "Yes")],
                        ),
                        FieldSpec::number("Financial_Stress", "Financial Stress (0-5)", SLIDER),
                    ],
                    description: None,
                },
            ]
        });
        &SECTIONS
    }
}
