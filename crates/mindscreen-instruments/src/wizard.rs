//! Sectioned assessment wizard.
//!
//! Walks the user through the local-factors sections one at a time and
//! owns everything that belongs to one sitting: the answer map, the current
//! section, the set of sections confirmed with "next", and the outcome of
//! the latest prediction and recommendation requests.
//!
//! Network calls happen outside the wizard. A caller takes a ticket with
//! [`AssessmentWizard::begin_submit`], performs the request, and hands the
//! outcome back with [`AssessmentWizard::complete_submit`]. Each ticket
//! carries a generation number; an outcome whose ticket has been superseded
//! by a newer submission or a reset is discarded, so overlapping requests
//! can never overwrite a newer result.

use std::collections::BTreeSet;
use std::fmt::Display;

use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::PredictionResult;
use mindscreen_core::models::recommendation::RecommendationSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Instrument;
use crate::error::InstrumentError;
use crate::fields::{FieldValue, Section, ValidationError};
use crate::instruments::local_factors::{self, AnswerMap, LocalFactors};

/// A prediction request handed out by [`AssessmentWizard::begin_submit`].
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    generation: u64,
    kind: AssessmentKind,
    payload: AnswerMap,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    /// The answer map as it was when the ticket was issued.
    pub fn payload(&self) -> &AnswerMap {
        &self.payload
    }
}

/// A recommendation request for the stored prediction.
#[derive(Debug, Clone)]
pub struct RecommendationTicket {
    generation: u64,
    kind: AssessmentKind,
    result: PredictionResult,
}

impl RecommendationTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    pub fn result(&self) -> &PredictionResult {
        &self.result
    }
}

/// What happened to a prediction outcome handed back to the wizard.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The result was stored. Recommendations for it should be requested
    /// with the enclosed ticket.
    Stored { recommendation: RecommendationTicket },
    /// The error was recorded and can be retried by submitting again.
    Failed,
    /// A newer submission or a reset superseded this ticket; nothing changed.
    Stale,
}

/// What happened to a recommendation outcome handed back to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Stored,
    Failed,
    Stale,
}

/// Position and completion for a progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based index of the current section.
    pub section: usize,
    pub total: usize,
    pub completed: usize,
    pub percent: f64,
}

#[derive(Debug, Default)]
struct RecommendationSlot {
    generation: u64,
    in_flight: bool,
    set: Option<RecommendationSet>,
    error: Option<String>,
}

impl RecommendationSlot {
    /// Drop the stored outcome and invalidate any in-flight request.
    fn invalidate(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.set = None;
        self.error = None;
    }
}

#[derive(Debug)]
pub struct AssessmentWizard {
    instrument: LocalFactors,
    answers: AnswerMap,
    current: usize,
    completed: BTreeSet<usize>,
    generation: u64,
    in_flight: bool,
    result: Option<PredictionResult>,
    error: Option<String>,
    recommendation: RecommendationSlot,
}

impl AssessmentWizard {
    pub fn new(kind: AssessmentKind) -> Self {
        Self {
            instrument: LocalFactors::new(kind),
            answers: AnswerMap::defaults(kind),
            current: 0,
            completed: BTreeSet::new(),
            generation: 0,
            in_flight: false,
            result: None,
            error: None,
            recommendation: RecommendationSlot::default(),
        }
    }

    pub fn kind(&self) -> AssessmentKind {
        self.instrument.kind()
    }

    pub fn instrument(&self) -> &LocalFactors {
        &self.instrument
    }

    pub fn sections(&self) -> &'static [Section] {
        local_factors::sections(self.kind())
    }

    pub fn section_count(&self) -> usize {
        self.sections().len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> &'static Section {
        &self.sections()[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.section_count()
    }

    // ── Answers ──────────────────────────────────────────────────────────

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn value(&self, field_id: &str) -> Option<i64> {
        self.answers.get(field_id)
    }

    /// Set one field. Rejects unknown keys, the field excluded from this
    /// variant, and values outside the field's range.
    pub fn set_field(&mut self, field_id: &str, value: i64) -> Result<(), InstrumentError> {
        let kind = self.kind();
        if field_id == local_factors::excluded_field(kind) {
            return Err(InstrumentError::InactiveField {
                field_id: field_id.to_string(),
                kind: kind.to_string(),
            });
        }

        if !self.answers.contains(field_id) {
            return Err(InstrumentError::UnknownField {
                instrument_id: self.instrument.id().to_string(),
                field_id: field_id.to_string(),
            });
        }

        let errors = self.instrument.validate_values(&[FieldValue {
            field_id: field_id.to_string(),
            value: value as f64,
        }]);
        if let Some(error) = errors.into_iter().next() {
            return Err(error.into());
        }

        self.answers.replace(field_id, value);
        Ok(())
    }

    /// Set a checkbox field from a boolean.
    pub fn set_flag(&mut self, field_id: &str, on: bool) -> Result<(), InstrumentError> {
        self.set_field(field_id, i64::from(on))
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Jump straight to a section. Does not mark anything complete.
    pub fn select_section(&mut self, index: usize) -> Result<(), InstrumentError> {
        let count = self.section_count();
        if index >= count {
            return Err(InstrumentError::UnknownSection { index, count });
        }
        self.current = index;
        debug!(kind = %self.kind(), section = index, "section selected");
        Ok(())
    }

    /// Confirm the current section and move forward. At the last section
    /// this does nothing and returns `false`.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.completed.insert(self.current);
        self.current += 1;
        debug!(kind = %self.kind(), section = self.current, "advanced to next section");
        true
    }

    /// Step back one section. Completion is unchanged.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn progress(&self) -> Progress {
        let total = self.section_count();
        Progress {
            section: self.current + 1,
            total,
            completed: self.completed.len(),
            percent: (self.current + 1) as f64 / total as f64 * 100.0,
        }
    }

    // ── Prediction ───────────────────────────────────────────────────────

    /// Start a prediction request for the current answers.
    ///
    /// Only allowed from the last section. Any stored result, error, and
    /// recommendations are cleared, and every earlier ticket goes stale.
    pub fn begin_submit(&mut self) -> Result<SubmissionTicket, InstrumentError> {
        if !self.is_last() {
            return Err(InstrumentError::NotAtLastSection);
        }
        self.validate_answers()?;

        self.generation += 1;
        self.in_flight = true;
        self.result = None;
        self.error = None;
        self.recommendation.invalidate();

        debug!(kind = %self.kind(), generation = self.generation, "prediction submitted");

        Ok(SubmissionTicket {
            generation: self.generation,
            kind: self.kind(),
            payload: self.answers.clone(),
        })
    }

    /// Hand back the outcome of a prediction request. Each ticket applies
    /// at most once; a copy handed back later is stale.
    pub fn complete_submit<E: Display>(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictionResult, E>,
    ) -> SubmitOutcome {
        if ticket.generation != self.generation || !self.in_flight {
            debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale prediction outcome"
            );
            return SubmitOutcome::Stale;
        }
        self.in_flight = false;

        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                let recommendation = self.issue_recommendation(result);
                SubmitOutcome::Stored { recommendation }
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Whether the latest submission produced a result.
    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ── Recommendations ──────────────────────────────────────────────────

    /// Request fresh recommendations for the stored result, e.g. after a
    /// failure or to regenerate them.
    pub fn begin_recommendation(&mut self) -> Result<RecommendationTicket, InstrumentError> {
        let result = self.result.clone().ok_or(InstrumentError::NoResult)?;
        Ok(self.issue_recommendation(result))
    }

    pub fn complete_recommendation<E: Display>(
        &mut self,
        ticket: RecommendationTicket,
        outcome: Result<RecommendationSet, E>,
    ) -> Applied {
        let slot = &mut self.recommendation;
        if ticket.generation != slot.generation || !slot.in_flight {
            return Applied::Stale;
        }
        slot.in_flight = false;
        match outcome {
            Ok(set) => {
                slot.set = Some(set);
                Applied::Stored
            }
            Err(e) => {
                slot.error = Some(e.to_string());
                Applied::Failed
            }
        }
    }

    pub fn recommendations(&self) -> Option<&RecommendationSet> {
        self.recommendation.set.as_ref()
    }

    pub fn recommendation_error(&self) -> Option<&str> {
        self.recommendation.error.as_deref()
    }

    pub fn recommendations_loading(&self) -> bool {
        self.recommendation.in_flight
    }

    // ── Reset ────────────────────────────────────────────────────────────

    /// Back to the defaults and the first section, with no result, error or
    /// completion. Outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.answers = AnswerMap::defaults(self.kind());
        self.current = 0;
        self.completed.clear();
        self.generation += 1;
        self.in_flight = false;
        self.result = None;
        self.error = None;
        self.recommendation.invalidate();
        debug!(kind = %self.kind(), "wizard reset");
    }

    fn issue_recommendation(&mut self, result: PredictionResult) -> RecommendationTicket {
        self.recommendation.invalidate();
        self.recommendation.in_flight = true;
        RecommendationTicket {
            generation: self.recommendation.generation,
            kind: self.kind(),
            result,
        }
    }

    /// Every active field must hold an in-range value.
    fn validate_answers(&self) -> Result<(), InstrumentError> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let mut values = Vec::new();
        for section in self.sections() {
            for field in &section.fields {
                match self.answers.get(&field.id) {
                    Some(v) => values.push(FieldValue {
                        field_id: field.id.clone(),
                        value: v as f64,
                    }),
                    None => errors.push(ValidationError::new(
                        &field.id,
                        format!("{} is required", field.label),
                    )),
                }
            }
        }
        errors.extend(self.instrument.validate_values(&values));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(InstrumentError::InvalidForm { errors })
        }
    }
}
