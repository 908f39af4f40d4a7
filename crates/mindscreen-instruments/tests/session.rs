use mindscreen_instruments::error::InstrumentError;
use mindscreen_instruments::instruments::phq9::{Answer, Difficulty, Severity};
use mindscreen_instruments::session::Phq9Session;

fn answer_all(session: &mut Phq9Session, answer: Answer) {
    for q in 1..=9 {
        session.set_answer(q, answer).expect("answer accepted");
    }
}

#[test]
fn new_session_starts_unset() {
    let session = Phq9Session::new();
    assert!((1..=9).all(|q| session.answer(q).is_none()));
    assert!(session.difficulty().is_none());
    assert_eq!(session.preview().total, 0);
    assert!(session.report().is_none());
}

#[test]
fn preview_updates_on_every_answer() {
    let mut session = Phq9Session::new();
    let preview = session.set_answer(1, Answer::NearlyEveryDay).unwrap();
    assert_eq!(preview.total, 3);
    assert_eq!(preview.answered, 1);

    let preview = session.set_answer(2, Answer::MoreThanHalfTheDays).unwrap();
    assert_eq!(preview.total, 5);
    assert_eq!(preview.severity, Severity::Mild);

    // Changing an answer replaces it rather than adding to it.
    let preview = session.set_answer(1, Answer::NotAtAll).unwrap();
    assert_eq!(preview.total, 2);
    assert_eq!(preview.severity, Severity::Minimal);
}

#[test]
fn submit_is_rejected_while_any_item_is_unset() {
    let mut session = Phq9Session::new();
    for q in 1..=8 {
        session.set_answer(q, Answer::SeveralDays).unwrap();
    }
    session.set_difficulty(Difficulty::SomewhatDifficult).unwrap();

    let err = session.submit().expect_err("q9 is unset");
    assert!(matches!(err, InstrumentError::Incomplete { ref missing } if missing.len() == 1 && missing[0] == "q9"));
    assert!(!session.is_submitted());
}

#[test]
fn submit_is_rejected_without_difficulty() {
    let mut session = Phq9Session::new();
    answer_all(&mut session, Answer::NotAtAll);
    assert!(session.submit().is_err());
}

#[test]
fn submit_freezes_the_session() {
    let mut session = Phq9Session::new();
    answer_all(&mut session, Answer::MoreThanHalfTheDays);
    session.set_difficulty(Difficulty::VeryDifficult).unwrap();

    let report = session.submit().expect("complete session").clone();
    assert_eq!(report.total(), 18);
    assert_eq!(report.severity(), Severity::ModeratelySevere);
    assert!(report.crisis());
    assert_eq!(report.difficulty, Difficulty::VeryDifficult);
    assert!(report.interpretation.contains("significant"));
    assert_eq!(report.session_id, session.id());

    assert!(matches!(
        session.set_answer(1, Answer::NotAtAll),
        Err(InstrumentError::AlreadySubmitted)
    ));
    assert!(matches!(session.submit(), Err(InstrumentError::AlreadySubmitted)));
}

#[test]
fn question_numbers_outside_one_to_nine_are_rejected() {
    let mut session = Phq9Session::new();
    assert!(matches!(
        session.set_answer(0, Answer::NotAtAll),
        Err(InstrumentError::UnknownQuestion(0))
    ));
    assert!(matches!(
        session.set_answer(10, Answer::NotAtAll),
        Err(InstrumentError::UnknownQuestion(10))
    ));
}

#[test]
fn retake_discards_everything() {
    let mut session = Phq9Session::new();
    let first_id = session.id();
    answer_all(&mut session, Answer::SeveralDays);
    session.set_difficulty(Difficulty::NotDifficult).unwrap();
    session.submit().unwrap();

    session.retake();
    assert_ne!(session.id(), first_id);
    assert!(!session.is_submitted());
    assert!((1..=9).all(|q| session.answer(q).is_none()));
    assert!(session.difficulty().is_none());
}
