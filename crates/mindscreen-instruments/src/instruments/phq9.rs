//! PHQ-9: Patient Health Questionnaire, nine items.
//!
//! Each item is rated 0–3 over the last two weeks; the total (0–27) maps to
//! a severity band. Item 9 asks about self-harm ideation and can raise the
//! crisis flag on its own, independent of the total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Instrument;
use crate::error::InstrumentError;
use crate::fields::{FieldKind, FieldSpec, Section};

pub const QUESTION_COUNT: usize = 9;
pub const MAX_TOTAL: u8 = 27;

pub const PROMPT: &str = "Over the last 2 weeks, how often have you been bothered by any of the \
following problems?";

pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself or that you are a failure or have let yourself or your family down",
    "Trouble concentrating on things, such as reading the newspaper or watching television",
    "Moving or speaking so slowly that other people could have noticed. Or the opposite, being so \
fidgety or restless that you have been moving around a lot more than usual",
    "Thoughts that you would be better off dead, or of hurting yourself",
];

pub const DIFFICULTY_PROMPT: &str = "If you checked off any problems, how difficult have these \
problems made it for you to do your work, take care of things at home, or get along with other \
people?";

pub const CRISIS_RESOURCES: &str = "Based on your responses, we strongly recommend speaking with a \
mental health professional. Help is available.\nNational Suicide Prevention Lifeline: 988 or \
1-800-273-8255";

/// How often a problem occurred. Ordinal value 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Answer {
    NotAtAll = 0,
    SeveralDays = 1,
    MoreThanHalfTheDays = 2,
    NearlyEveryDay = 3,
}

impl Answer {
    pub const ALL: [Answer; 4] = [
        Answer::NotAtAll,
        Answer::SeveralDays,
        Answer::MoreThanHalfTheDays,
        Answer::NearlyEveryDay,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Answer::NotAtAll => "Not at all",
            Answer::SeveralDays => "Several days",
            Answer::MoreThanHalfTheDays => "More than half the days",
            Answer::NearlyEveryDay => "Nearly every day",
        }
    }
}

impl TryFrom<u8> for Answer {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Answer::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("answer must be between 0 and 3, got {value}"))
    }
}

impl From<Answer> for u8 {
    fn from(answer: Answer) -> u8 {
        answer.value()
    }
}

/// How much the reported problems interfere with daily life. Ordinal 0–3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    NotDifficult = 0,
    SomewhatDifficult = 1,
    VeryDifficult = 2,
    ExtremelyDifficult = 3,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::NotDifficult,
        Difficulty::SomewhatDifficult,
        Difficulty::VeryDifficult,
        Difficulty::ExtremelyDifficult,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::NotDifficult => "Not difficult at all",
            Difficulty::SomewhatDifficult => "Somewhat difficult",
            Difficulty::VeryDifficult => "Very difficult",
            Difficulty::ExtremelyDifficult => "Extremely difficult",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Difficulty::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("difficulty must be between 0 and 3, got {value}"))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.value()
    }
}

/// Severity band of a PHQ-9 total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    /// Bands: 0–4, 5–9, 10–14, 15–19, 20+.
    pub fn from_total(total: u8) -> Self {
        match total {
            0..=4 => Severity::Minimal,
            5..=9 => Severity::Mild,
            10..=14 => Severity::Moderate,
            15..=19 => Severity::ModeratelySevere,
            _ => Severity::Severe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal depression",
            Severity::Mild => "Mild depression",
            Severity::Moderate => "Moderate depression",
            Severity::ModeratelySevere => "Moderately severe depression",
            Severity::Severe => "Severe depression",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring a complete set of nine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phq9Score {
    pub total: u8,
    pub severity: Severity,
    pub crisis: bool,
}

/// Score a complete answer set.
pub fn score(answers: &[Answer; QUESTION_COUNT]) -> Phq9Score {
    let total: u8 = answers.iter().map(|a| a.value()).sum();
    Phq9Score {
        total,
        severity: Severity::from_total(total),
        crisis: crisis_flag(total, answers[QUESTION_COUNT - 1]),
    }
}

/// Raised when the total exceeds 9 or item 9 is answered above
/// "Several days".
pub fn crisis_flag(total: u8, self_harm_item: Answer) -> bool {
    total > 9 || self_harm_item > Answer::SeveralDays
}

/// Guidance shown with a finalized result.
pub fn interpretation(total: u8) -> &'static str {
    match total {
        0..=4 => {
            "Your assessment indicates minimal depression symptoms. Continue with self-care practices."
        }
        5..=9 => {
            "Your assessment indicates mild depression symptoms. Consider talking to a counselor."
        }
        10..=14 => {
            "Your assessment indicates moderate depression symptoms. We recommend consulting with \
             a mental health professional."
        }
        _ => {
            "Your assessment indicates significant depression symptoms. Please prioritize seeking \
             help from a healthcare provider or mental health professional."
        }
    }
}

/// Check that every item and the difficulty rating are set, returning the
/// answers in question order.
///
/// Unset items are reported by id (`q1`..`q9`, `difficulty`). They are
/// never treated as zero.
pub fn require_complete(
    answers: &[Option<Answer>; QUESTION_COUNT],
    difficulty: Option<Difficulty>,
) -> Result<([Answer; QUESTION_COUNT], Difficulty), InstrumentError> {
    let mut complete = [Answer::NotAtAll; QUESTION_COUNT];
    let mut missing = Vec::new();
    for (i, answer) in answers.iter().enumerate() {
        match answer {
            Some(a) => complete[i] = *a,
            None => missing.push(question_id(i + 1)),
        }
    }

    match difficulty {
        Some(difficulty) if missing.is_empty() => Ok((complete, difficulty)),
        Some(_) => Err(InstrumentError::Incomplete { missing }),
        None => {
            missing.push("difficulty".to_string());
            Err(InstrumentError::Incomplete { missing })
        }
    }
}

pub fn question_id(number: usize) -> String {
    format!("q{number}")
}

pub struct Phq9;

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            let answer_options: Vec<(i64, &str)> = Answer::ALL
                .iter()
                .map(|a| (a.value() as i64, a.label()))
                .collect();
            let difficulty_options: Vec<(i64, &str)> = Difficulty::ALL
                .iter()
                .map(|d| (d.value() as i64, d.label()))
                .collect();

            let items = QUESTIONS
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    FieldSpec::choice(
                        &question_id(i + 1),
                        text,
                        FieldKind::Rating,
                        &answer_options,
                    )
                })
                .collect();

            vec![
                Section {
                    id: "phq9_items".to_string(),
                    title: "PHQ-9 Items".to_string(),
                    fields: items,
                    description: Some(PROMPT.to_string()),
                },
                Section {
                    id: "functional_difficulty".to_string(),
                    title: "Functional Difficulty".to_string(),
                    fields: vec![FieldSpec::choice(
                        "difficulty",
                        "Difficulty",
                        FieldKind::Rating,
                        &difficulty_options,
                    )],
                    description: Some(DIFFICULTY_PROMPT.to_string()),
                },
            ]
        });
        &SECTIONS
    }
}
