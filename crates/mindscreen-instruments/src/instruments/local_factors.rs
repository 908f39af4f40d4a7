//! Local-factors anxiety and depression assessment.
//!
//! Twenty-two socioeconomic and health fields grouped into six sections.
//! The two variants share everything except one field: the depression
//! variant asks about `anxiety`, the anxiety variant about `ptsd`.

use std::collections::BTreeMap;

use mindscreen_core::models::kind::AssessmentKind;
use serde::Serialize;

use crate::Instrument;
use crate::fields::{FieldKind, FieldRange, FieldSpec, Section};

const INCOME: FieldRange = FieldRange::integer(0.0, 200_000.0);

/// Every field with its default, in payload order. The variant-specific
/// field is handled by [`variant_field`].
const SHARED_DEFAULTS: [(&str, i64); 21] = [
    ("benzodiazepine_use", 0),
    ("tobacco_use", 0),
    ("unemployed", 0),
    ("rural", 0),
    ("low_education", 0),
    ("average_income", 50_000),
    ("is_school_dropout", 0),
    ("was_child_married", 0),
    ("has_chronic_disease", 0),
    ("exposed_to_domestic_violence", 0),
    ("aware_of_mental_health", 1),
    ("has_been_a_crime_victim", 0),
    ("can_access_healthcare", 1),
    ("has_mental_health_facility_access", 1),
    ("has_internet", 1),
    ("orphan", 0),
    ("individual_married", 0),
    ("individual_employed", 1),
    ("family_liability", 0),
    ("has_bank_loan", 0),
    ("gender_encoded", 0),
];

/// Section layout before variant filtering: (id, title, fields).
const LAYOUT: [(&str, &str, &[&str]); 6] = [
    ("demographics", "Demographics", &["average_income", "gender_encoded"]),
    (
        "health",
        "Health Conditions",
        &["anxiety", "ptsd", "has_chronic_disease", "benzodiazepine_use", "tobacco_use"],
    ),
    (
        "socioeconomic",
        "Socioeconomic Factors",
        &["unemployed", "rural", "low_education", "is_school_dropout"],
    ),
    (
        "personal",
        "Personal History",
        &[
            "was_child_married",
            "exposed_to_domestic_violence",
            "has_been_a_crime_victim",
            "orphan",
        ],
    ),
    (
        "access",
        "Access & Support",
        &[
            "can_access_healthcare",
            "has_mental_health_facility_access",
            "aware_of_mental_health",
            "has_internet",
        ],
    ),
    (
        "status",
        "Current Status",
        &["individual_married", "individual_employed", "family_liability", "has_bank_loan"],
    ),
];

/// The field only present in the given variant.
pub fn variant_field(kind: AssessmentKind) -> &'static str {
    match kind {
        AssessmentKind::Anxiety => "ptsd",
        AssessmentKind::Depression => "anxiety",
    }
}

/// The field excluded from the given variant.
pub fn excluded_field(kind: AssessmentKind) -> &'static str {
    match kind {
        AssessmentKind::Anxiety => "anxiety",
        AssessmentKind::Depression => "ptsd",
    }
}

pub fn field_label(id: &str) -> Option<&'static str> {
    let label = match id {
        "average_income" => "Average Income (₹)",
        "gender_encoded" => "Gender",
        "anxiety" | "ptsd" => "Experience palpitations",
        "has_chronic_disease" => "Has chronic disease",
        "benzodiazepine_use" => "Benzodiazepine use",
        "tobacco_use" => "Tobacco use",
        "unemployed" => "Currently unemployed",
        "rural" => "Lives in rural area",
        "low_education" => "Low education level",
        "is_school_dropout" => "School dropout",
        "was_child_married" => "Was child married",
        "exposed_to_domestic_violence" => "Exposed to domestic violence",
        "has_been_a_crime_victim" => "Been a crime victim",
        "orphan" => "Orphan",
        "can_access_healthcare" => "Can access healthcare",
        "has_mental_health_facility_access" => "Has mental health facility access",
        "aware_of_mental_health" => "Aware of mental health",
        "has_internet" => "Has internet access",
        "individual_married" => "Currently married",
        "individual_employed" => "Currently employed",
        "family_liability" => "Has family liability",
        "has_bank_loan" => "Has bank loan",
        _ => return None,
    };
    Some(label)
}

fn field_spec(id: &str) -> Option<FieldSpec> {
    let label = field_label(id)?;
    Some(match id {
        "average_income" => FieldSpec::number(id, label, INCOME),
        "gender_encoded" => {
            FieldSpec::choice(id, label, FieldKind::Select, &[(0, "Female"), (1, "Male")])
        }
        _ => FieldSpec::checkbox(id, label),
    })
}

fn build_sections(kind: AssessmentKind) -> Vec<Section> {
    let excluded = excluded_field(kind);
    LAYOUT
        .iter()
        .map(|(id, title, fields)| Section {
            id: id.to_string(),
            title: title.to_string(),
            fields: fields
                .iter()
                .filter(|f| **f != excluded)
                .filter_map(|f| field_spec(f))
                .collect(),
            description: Some("Complete this section to continue with your assessment".to_string()),
        })
        .collect()
}

/// Sections for the given variant, with the excluded field removed.
pub fn sections(kind: AssessmentKind) -> &'static [Section] {
    static ANXIETY: std::sync::LazyLock<Vec<Section>> =
        std::sync::LazyLock::new(|| build_sections(AssessmentKind::Anxiety));
    static DEPRESSION: std::sync::LazyLock<Vec<Section>> =
        std::sync::LazyLock::new(|| build_sections(AssessmentKind::Depression));

    match kind {
        AssessmentKind::Anxiety => &ANXIETY,
        AssessmentKind::Depression => &DEPRESSION,
    }
}

/// The flat field → value payload sent to the predictor.
///
/// Always holds exactly the 22 keys of its variant. Boolean fields are
/// stored as 0/1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerMap {
    values: BTreeMap<&'static str, i64>,
}

impl AnswerMap {
    /// The documented defaults for a variant.
    pub fn defaults(kind: AssessmentKind) -> Self {
        let mut values: BTreeMap<&'static str, i64> = SHARED_DEFAULTS.into_iter().collect();
        values.insert(variant_field(kind), 0);
        Self { values }
    }

    pub fn get(&self, field_id: &str) -> Option<i64> {
        self.values.get(field_id).copied()
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    /// Overwrite an existing key. Returns `false` for keys outside the map.
    pub(crate) fn replace(&mut self, field_id: &str, value: i64) -> bool {
        match self.values.get_mut(field_id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LocalFactors {
    kind: AssessmentKind,
}

impl LocalFactors {
    pub fn new(kind: AssessmentKind) -> Self {
        Self { kind }
    }

    pub fn anxiety() -> Self {
        Self::new(AssessmentKind::Anxiety)
    }

    pub fn depression() -> Self {
        Self::new(AssessmentKind::Depression)
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }
}

impl Instrument for LocalFactors {
    fn id(&self) -> &str {
        match self.kind {
            AssessmentKind::Anxiety => "anxiety",
            AssessmentKind::Depression => "depression",
        }
    }

    fn name(&self) -> &str {
        match self.kind {
            AssessmentKind::Anxiety => "Anxiety Assessment",
            AssessmentKind::Depression => "Depression Assessment",
        }
    }

    fn sections(&self) -> &[Section] {
        sections(self.kind)
    }
}
