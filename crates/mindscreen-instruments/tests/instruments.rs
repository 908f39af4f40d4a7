use mindscreen_instruments::fields::FieldValue;
use mindscreen_instruments::{Instrument, all_instruments, get_instrument};

#[test]
fn registry_lists_every_instrument() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["phq9", "student", "anxiety", "depression"]);
}

#[test]
fn unknown_instrument_is_an_error() {
    assert!(get_instrument("gad7").is_err());
    assert_eq!(get_instrument("phq9").unwrap().name(), "PHQ-9");
}

#[test]
fn phq9_has_nine_rated_items_and_difficulty() {
    let phq9 = get_instrument("phq9").unwrap();
    let sections = phq9.sections();
    assert_eq!(sections[0].fields.len(), 9);
    assert_eq!(sections[0].fields[8].id, "q9");
    assert_eq!(sections[1].fields[0].id, "difficulty");
    assert_eq!(
        sections[0].fields[0].option_label(2),
        Some("More than half the days")
    );
}

#[test]
fn validate_values_flags_range_and_unknown_fields() {
    let phq9 = get_instrument("phq9").unwrap();
    let errors = phq9.validate_values(&[
        FieldValue { field_id: "q1".to_string(), value: 3.0 },
        FieldValue { field_id: "q2".to_string(), value: 4.0 },
        FieldValue { field_id: "q2.5".to_string(), value: 1.0 },
        FieldValue { field_id: "q3".to_string(), value: 1.5 },
    ]);
    let ids: Vec<&str> = errors.iter().map(|e| e.field_id.as_str()).collect();
    assert_eq!(ids, vec!["q2", "q2.5", "q3"]);
}

#[test]
fn summary_groups_values_by_section_with_labels() {
    let depression = get_instrument("depression").unwrap();
    let summary = depression.to_summary(&[
        FieldValue { field_id: "gender_encoded".to_string(), value: 1.0 },
        FieldValue { field_id: "orphan".to_string(), value: 0.0 },
    ]);
    assert!(summary.starts_with("## Depression Assessment"));
    assert!(summary.contains("### Demographics\n- Gender: Male\n"));
    assert!(summary.contains("- Orphan: 0\n"));
}
