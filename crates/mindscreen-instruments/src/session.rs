//! PHQ-9 questionnaire session.
//!
//! Holds the answers for one sitting. The running total and severity are
//! recomputed on every change so a caller can preview them, while the
//! interpretation and crisis disclosure live only on the frozen
//! [`Phq9Report`] produced by [`Phq9Session::submit`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::InstrumentError;
use crate::instruments::phq9::{
    self, Answer, Difficulty, Phq9Score, QUESTION_COUNT, Severity,
};

/// Running total over the answers given so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phq9Preview {
    pub total: u8,
    pub severity: Severity,
    pub answered: usize,
}

/// A finalized PHQ-9 result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phq9Report {
    pub session_id: Uuid,
    pub answers: [Answer; QUESTION_COUNT],
    pub difficulty: Difficulty,
    pub score: Phq9Score,
    pub interpretation: String,
    pub submitted_at: jiff::Timestamp,
}

impl Phq9Report {
    pub fn total(&self) -> u8 {
        self.score.total
    }

    pub fn severity(&self) -> Severity {
        self.score.severity
    }

    /// Whether suicide-prevention resources must be shown.
    pub fn crisis(&self) -> bool {
        self.score.crisis
    }
}

#[derive(Debug, Clone)]
pub struct Phq9Session {
    id: Uuid,
    answers: [Option<Answer>; QUESTION_COUNT],
    difficulty: Option<Difficulty>,
    report: Option<Phq9Report>,
    created_at: jiff::Timestamp,
}

impl Default for Phq9Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Phq9Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            answers: [None; QUESTION_COUNT],
            difficulty: None,
            report: None,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at
    }

    /// Record the answer to question `number` (1-based).
    pub fn set_answer(&mut self, number: usize, answer: Answer) -> Result<Phq9Preview, InstrumentError> {
        self.ensure_open()?;
        let slot = number
            .checked_sub(1)
            .and_then(|i| self.answers.get_mut(i))
            .ok_or(InstrumentError::UnknownQuestion(number))?;
        *slot = Some(answer);
        let preview = self.preview();
        debug!(session_id = %self.id, answered = preview.answered, "phq9 answer recorded");
        Ok(preview)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), InstrumentError> {
        self.ensure_open()?;
        self.difficulty = Some(difficulty);
        Ok(())
    }

    pub fn answer(&self, number: usize) -> Option<Answer> {
        number
            .checked_sub(1)
            .and_then(|i| self.answers.get(i))
            .copied()
            .flatten()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Sum and band of the answers given so far. Unanswered items are left
    /// out, so this can understate the final result.
    pub fn preview(&self) -> Phq9Preview {
        let answered: Vec<u8> = self.answers.iter().flatten().map(|a| a.value()).collect();
        let total = answered.iter().sum();
        Phq9Preview {
            total,
            severity: Severity::from_total(total),
            answered: answered.len(),
        }
    }

    /// Freeze the session into a report.
    ///
    /// Fails with [`InstrumentError::Incomplete`] while any item or the
    /// difficulty rating is unset.
    pub fn submit(&mut self) -> Result<&Phq9Report, InstrumentError> {
        self.ensure_open()?;
        let (answers, difficulty) = phq9::require_complete(&self.answers, self.difficulty)?;
        let score = phq9::score(&answers);

        debug!(
            session_id = %self.id,
            severity = ?score.severity,
            crisis = score.crisis,
            "phq9 session finalized"
        );

        Ok(&*self.report.insert(Phq9Report {
            session_id: self.id,
            answers,
            difficulty,
            score,
            interpretation: phq9::interpretation(score.total).to_string(),
            submitted_at: jiff::Timestamp::now(),
        }))
    }

    pub fn report(&self) -> Option<&Phq9Report> {
        self.report.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.report.is_some()
    }

    /// Discard this sitting and start over with everything unset.
    pub fn retake(&mut self) {
        *self = Self::new();
    }

    fn ensure_open(&self) -> Result<(), InstrumentError> {
        if self.report.is_some() {
            return Err(InstrumentError::AlreadySubmitted);
        }
        Ok(())
    }
}
