use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::PredictionResult;
use mindscreen_core::models::recommendation::{RecommendationOrigin, RecommendationSet};
use mindscreen_instruments::error::InstrumentError;
use mindscreen_instruments::instruments::local_factors::AnswerMap;
use mindscreen_instruments::wizard::{Applied, AssessmentWizard, SubmitOutcome};

fn positive() -> PredictionResult {
    PredictionResult {
        prediction: 1,
        probability: Some(vec![0.2, 0.8]),
    }
}

fn at_last_section(kind: AssessmentKind) -> AssessmentWizard {
    let mut wizard = AssessmentWizard::new(kind);
    while wizard.next() {}
    wizard
}

fn recommendations() -> RecommendationSet {
    RecommendationSet {
        items: vec!["Take a short walk".to_string()],
        origin: RecommendationOrigin::Generated,
        severity: "severe".to_string(),
        confidence: Some(80.0),
    }
}

#[test]
fn defaults_match_documented_values() {
    let wizard = AssessmentWizard::new(AssessmentKind::Depression);
    let answers = wizard.answers();
    assert_eq!(answers.len(), 22);
    assert_eq!(answers.get("average_income"), Some(50_000));
    assert_eq!(answers.get("gender_encoded"), Some(0));
    for on in [
        "aware_of_mental_health",
        "can_access_healthcare",
        "has_mental_health_facility_access",
        "has_internet",
        "individual_employed",
    ] {
        assert_eq!(answers.get(on), Some(1), "{on}");
    }
    assert_eq!(answers.get("tobacco_use"), Some(0));
    assert_eq!(answers.get("anxiety"), Some(0));
    assert_eq!(answers.get("ptsd"), None);
}

#[test]
fn variants_differ_only_in_their_exclusive_field() {
    let anxiety = AnswerMap::defaults(AssessmentKind::Anxiety);
    let depression = AnswerMap::defaults(AssessmentKind::Depression);
    assert!(anxiety.contains("ptsd") && !anxiety.contains("anxiety"));
    assert!(depression.contains("anxiety") && !depression.contains("ptsd"));

    let shared_a: Vec<_> = anxiety.iter().filter(|(k, _)| *k != "ptsd").collect();
    let shared_d: Vec<_> = depression.iter().filter(|(k, _)| *k != "anxiety").collect();
    assert_eq!(shared_a, shared_d);
}

#[test]
fn sections_hide_the_excluded_field() {
    let wizard = AssessmentWizard::new(AssessmentKind::Anxiety);
    let health = &wizard.sections()[1];
    assert_eq!(health.id, "health");
    assert!(health.field("ptsd").is_some());
    assert!(health.field("anxiety").is_none());
    assert_eq!(wizard.section_count(), 6);
}

#[test]
fn payload_serializes_as_flat_map() {
    let wizard = AssessmentWizard::new(AssessmentKind::Anxiety);
    let json = serde_json::to_value(wizard.answers()).unwrap();
    let obj = json.as_object().expect("flat object");
    assert_eq!(obj.len(), 22);
    assert_eq!(obj["average_income"], 50_000);
    assert_eq!(obj["ptsd"], 0);
    assert_eq!(json, wizard.answers().to_json());
}

#[test]
fn next_marks_complete_and_advances() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Depression);
    assert!(wizard.next());
    assert_eq!(wizard.current_index(), 1);
    assert!(wizard.is_completed(0));
    assert!(!wizard.is_completed(1));
}

#[test]
fn next_at_last_section_is_a_no_op() {
    let mut wizard = at_last_section(AssessmentKind::Depression);
    let last = wizard.section_count() - 1;
    assert_eq!(wizard.current_index(), last);
    let completed_before = wizard.completed().clone();

    assert!(!wizard.next());
    assert_eq!(wizard.current_index(), last);
    assert_eq!(wizard.completed(), &completed_before);
    assert!(!wizard.is_completed(last));
}

#[test]
fn previous_clamps_and_keeps_completion() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Depression);
    wizard.previous();
    assert_eq!(wizard.current_index(), 0);

    wizard.next();
    wizard.next();
    wizard.previous();
    assert_eq!(wizard.current_index(), 1);
    assert!(wizard.is_completed(0));
    assert!(wizard.is_completed(1));
}

#[test]
fn select_section_does_not_mark_complete() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Anxiety);
    wizard.select_section(4).unwrap();
    assert_eq!(wizard.current_index(), 4);
    assert!(wizard.completed().is_empty());

    assert!(matches!(
        wizard.select_section(6),
        Err(InstrumentError::UnknownSection { index: 6, count: 6 })
    ));
}

#[test]
fn progress_reports_position_and_completion() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Anxiety);
    wizard.next();
    wizard.next();
    wizard.select_section(0).unwrap();
    let progress = wizard.progress();
    assert_eq!(progress.section, 1);
    assert_eq!(progress.total, 6);
    assert_eq!(progress.completed, 2);
    assert!((progress.percent - 100.0 / 6.0).abs() < 1e-9);
}

#[test]
fn set_field_validates_key_and_range() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Depression);
    wizard.set_flag("tobacco_use", true).unwrap();
    assert_eq!(wizard.value("tobacco_use"), Some(1));
    wizard.set_field("average_income", 120_000).unwrap();
    assert_eq!(wizard.value("average_income"), Some(120_000));

    assert!(matches!(
        wizard.set_field("ptsd", 1),
        Err(InstrumentError::InactiveField { .. })
    ));
    assert!(matches!(
        wizard.set_field("favourite_colour", 1),
        Err(InstrumentError::UnknownField { .. })
    ));
    assert!(matches!(
        wizard.set_field("rural", 2),
        Err(InstrumentError::Validation(_))
    ));
    assert!(wizard.set_field("average_income", 250_000).is_err());
    assert_eq!(wizard.value("rural"), Some(0));
}

#[test]
fn submit_requires_last_section() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Depression);
    assert!(matches!(
        wizard.begin_submit(),
        Err(InstrumentError::NotAtLastSection)
    ));
    assert!(!wizard.is_loading());
}

#[test]
fn successful_submission_stores_result_and_requests_recommendations() {
    let mut wizard = at_last_section(AssessmentKind::Anxiety);
    let ticket = wizard.begin_submit().unwrap();
    assert!(wizard.is_loading());
    assert_eq!(ticket.payload(), wizard.answers());

    let outcome = wizard.complete_submit(ticket, Ok::<_, String>(positive()));
    let SubmitOutcome::Stored { recommendation } = outcome else {
        panic!("expected stored outcome, got {outcome:?}");
    };
    assert!(!wizard.is_loading());
    assert!(wizard.is_submitted());
    assert_eq!(wizard.result().and_then(|r| r.confidence_label()).as_deref(), Some("80.0%"));
    assert!(wizard.recommendations_loading());
    assert_eq!(recommendation.kind(), AssessmentKind::Anxiety);
    assert_eq!(recommendation.result(), &positive());

    let applied = wizard.complete_recommendation(recommendation, Ok::<_, String>(recommendations()));
    assert_eq!(applied, Applied::Stored);
    assert_eq!(wizard.recommendations(), Some(&recommendations()));
    assert!(!wizard.recommendations_loading());
}

#[test]
fn failed_submission_records_error_for_retry() {
    let mut wizard = at_last_section(AssessmentKind::Depression);
    let ticket = wizard.begin_submit().unwrap();
    let outcome = wizard.complete_submit(ticket, Err("HTTP error! status: 500"));
    assert!(matches!(outcome, SubmitOutcome::Failed));
    assert_eq!(wizard.error(), Some("HTTP error! status: 500"));
    assert!(wizard.result().is_none());

    // Retrying clears the error.
    let retry = wizard.begin_submit().unwrap();
    assert!(wizard.error().is_none());
    wizard.complete_submit(retry, Ok::<_, String>(positive()));
    assert!(wizard.is_submitted());
}

#[test]
fn overlapping_submissions_keep_the_latest() {
    let mut wizard = at_last_section(AssessmentKind::Depression);
    let first = wizard.begin_submit().unwrap();
    let second = wizard.begin_submit().unwrap();
    assert!(second.generation() > first.generation());

    let newest = PredictionResult {
        prediction: 0,
        probability: Some(vec![0.9, 0.1]),
    };
    assert!(matches!(
        wizard.complete_submit(second, Ok::<_, String>(newest.clone())),
        SubmitOutcome::Stored { .. }
    ));
    // The older request resolves last and must not win.
    assert!(matches!(
        wizard.complete_submit(first, Ok::<_, String>(positive())),
        SubmitOutcome::Stale
    ));
    assert_eq!(wizard.result(), Some(&newest));
}

#[test]
fn outcomes_after_reset_are_discarded() {
    let mut wizard = at_last_section(AssessmentKind::Anxiety);
    let ticket = wizard.begin_submit().unwrap();
    wizard.reset();
    assert!(matches!(
        wizard.complete_submit(ticket, Ok::<_, String>(positive())),
        SubmitOutcome::Stale
    ));
    assert!(wizard.result().is_none());
}

#[test]
fn stale_recommendations_are_discarded() {
    let mut wizard = at_last_section(AssessmentKind::Anxiety);
    let ticket = wizard.begin_submit().unwrap();
    let SubmitOutcome::Stored { recommendation } =
        wizard.complete_submit(ticket, Ok::<_, String>(positive()))
    else {
        panic!("expected stored outcome");
    };
    let regenerated = wizard.begin_recommendation().unwrap();

    assert_eq!(
        wizard.complete_recommendation(recommendation, Ok::<_, String>(recommendations())),
        Applied::Stale
    );
    assert_eq!(
        wizard.complete_recommendation(regenerated, Err("Unable to generate recommendations")),
        Applied::Failed
    );
    assert_eq!(
        wizard.recommendation_error(),
        Some("Unable to generate recommendations")
    );
    assert!(wizard.recommendations().is_none());
}

#[test]
fn recommendations_need_a_result() {
    let mut wizard = AssessmentWizard::new(AssessmentKind::Depression);
    assert!(matches!(
        wizard.begin_recommendation(),
        Err(InstrumentError::NoResult)
    ));
}

#[test]
fn reset_restores_defaults_and_is_idempotent() {
    let mut wizard = at_last_section(AssessmentKind::Depression);
    wizard.set_field("average_income", 10_000).unwrap();
    wizard.set_flag("orphan", true).unwrap();
    let ticket = wizard.begin_submit().unwrap();
    wizard.complete_submit(ticket, Err("offline"));

    wizard.reset();
    let defaults = AnswerMap::defaults(AssessmentKind::Depression);
    assert_eq!(wizard.answers(), &defaults);
    assert!(wizard.completed().is_empty());
    assert_eq!(wizard.current_index(), 0);
    assert!(wizard.error().is_none());
    assert!(wizard.result().is_none());

    wizard.reset();
    assert_eq!(wizard.answers(), &defaults);
    assert!(wizard.completed().is_empty());
    assert_eq!(wizard.current_index(), 0);
}

#[test]
fn wizard_debug_output_names_the_variant() {
    let wizard = AssessmentWizard::new(AssessmentKind::Anxiety);
    let shown = format!("{wizard:?}");
    assert!(shown.contains("AssessmentWizard"));
    assert!(shown.contains("Anxiety"));
}

#[test]
fn submission_ticket_applies_only_once() {
    let mut wizard = at_last_section(AssessmentKind::Anxiety);
    let ticket = wizard.begin_submit().unwrap();
    let copy = ticket.clone();

    assert!(matches!(
        wizard.complete_submit(ticket, Ok::<_, String>(positive())),
        SubmitOutcome::Stored { .. }
    ));
    let negative = PredictionResult {
        prediction: 0,
        probability: Some(vec![0.9, 0.1]),
    };
    assert!(matches!(
        wizard.complete_submit(copy, Ok::<_, String>(negative)),
        SubmitOutcome::Stale
    ));
    assert_eq!(wizard.result(), Some(&positive()));
}

#[test]
fn recommendation_ticket_applies_only_once() {
    let mut wizard = at_last_section(AssessmentKind::Depression);
    let ticket = wizard.begin_submit().unwrap();
    let SubmitOutcome::Stored { recommendation } =
        wizard.complete_submit(ticket, Ok::<_, String>(positive()))
    else {
        panic!("expected a stored result");
    };
    let copy = recommendation.clone();

    assert_eq!(
        wizard.complete_recommendation(recommendation, Ok::<_, String>(recommendations())),
        Applied::Stored
    );
    assert_eq!(
        wizard.complete_recommendation(copy, Err("Unable to generate recommendations")),
        Applied::Stale
    );
    assert!(wizard.recommendation_error().is_none());
    assert_eq!(wizard.recommendations(), Some(&recommendations()));
}
