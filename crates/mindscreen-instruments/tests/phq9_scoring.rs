use mindscreen_instruments::instruments::phq9::{
    self, Answer, Difficulty, MAX_TOTAL, QUESTION_COUNT, Severity,
};
use proptest::prelude::*;

fn answers(values: [u8; QUESTION_COUNT]) -> [Answer; QUESTION_COUNT] {
    values.map(|v| Answer::try_from(v).expect("valid answer"))
}

/// Answers summing to `total` with item 9 left at zero.
fn with_total(total: u8) -> [Answer; QUESTION_COUNT] {
    let mut values = [0u8; QUESTION_COUNT];
    let mut remaining = total;
    for slot in values.iter_mut().take(QUESTION_COUNT - 1) {
        let take = remaining.min(3);
        *slot = take;
        remaining -= take;
    }
    assert_eq!(remaining, 0, "total {total} not reachable without item 9");
    answers(values)
}

#[test]
fn severity_bands_are_boundary_exact() {
    let cases = [
        (0, Severity::Minimal),
        (4, Severity::Minimal),
        (5, Severity::Mild),
        (9, Severity::Mild),
        (10, Severity::Moderate),
        (14, Severity::Moderate),
        (15, Severity::ModeratelySevere),
        (19, Severity::ModeratelySevere),
        (20, Severity::Severe),
        (27, Severity::Severe),
    ];
    for (total, expected) in cases {
        assert_eq!(Severity::from_total(total), expected, "total {total}");
    }
}

#[test]
fn severity_labels() {
    assert_eq!(Severity::Minimal.label(), "Minimal depression");
    assert_eq!(Severity::ModeratelySevere.to_string(), "Moderately severe depression");
    assert_eq!(Severity::Severe.label(), "Severe depression");
}

#[test]
fn self_harm_item_alone_raises_crisis_flag() {
    let score = phq9::score(&answers([0, 0, 0, 0, 0, 0, 0, 0, 2]));
    assert_eq!(score.total, 2);
    assert_eq!(score.severity, Severity::Minimal);
    assert!(score.crisis);
}

#[test]
fn total_of_nine_with_low_item_nine_is_not_crisis() {
    let score = phq9::score(&answers([1; QUESTION_COUNT]));
    assert_eq!(score.total, 9);
    assert!(!score.crisis);
}

#[test]
fn total_above_nine_raises_crisis_flag() {
    let score = phq9::score(&with_total(10));
    assert_eq!(score.total, 10);
    assert_eq!(score.severity, Severity::Moderate);
    assert!(score.crisis);
}

#[test]
fn interpretation_follows_total() {
    assert!(phq9::interpretation(4).contains("minimal"));
    assert!(phq9::interpretation(9).contains("counselor"));
    assert!(phq9::interpretation(14).contains("moderate"));
    assert!(phq9::interpretation(15).contains("significant"));
}

#[test]
fn missing_answers_are_reported_not_zeroed() {
    let mut partial = [Some(Answer::NearlyEveryDay); QUESTION_COUNT];
    partial[3] = None;
    partial[8] = None;

    let err = phq9::require_complete(&partial, Some(Difficulty::VeryDifficult))
        .expect_err("incomplete answers must be rejected");
    match err {
        mindscreen_instruments::error::InstrumentError::Incomplete { missing } => {
            assert_eq!(missing, vec!["q4".to_string(), "q9".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_difficulty_is_reported() {
    let full = [Some(Answer::NotAtAll); QUESTION_COUNT];
    let err = phq9::require_complete(&full, None).expect_err("difficulty is required");
    assert!(err.to_string().contains("difficulty"));
}

#[test]
fn answer_conversion_rejects_out_of_range() {
    assert!(Answer::try_from(4u8).is_err());
    assert!(Difficulty::try_from(9u8).is_err());
    assert_eq!(Answer::try_from(2u8), Ok(Answer::MoreThanHalfTheDays));
    assert_eq!(Answer::NearlyEveryDay.label(), "Nearly every day");
}

proptest! {
    #[test]
    fn total_is_sum_of_answers(values in proptest::array::uniform9(0u8..=3)) {
        let score = phq9::score(&answers(values));
        let expected: u8 = values.iter().sum();
        prop_assert_eq!(score.total, expected);
        prop_assert!(score.total <= MAX_TOTAL);
        prop_assert_eq!(score.severity, Severity::from_total(expected));
        prop_assert_eq!(score.crisis, expected > 9 || values[8] > 1);
    }

    #[test]
    fn severity_is_monotonic(a in 0u8..=27, b in 0u8..=27) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Severity::from_total(lo) <= Severity::from_total(hi));
    }
}
