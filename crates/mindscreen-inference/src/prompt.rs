//! Prompt builders for the recommendation generator.
//!
//! Both prompts ask for five short bullet points prefixed with `•`, which
//! is the format [`crate::recommend::split_recommendations`] expects back.

use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::{PredictionResult, PredictionSeverity};
use mindscreen_instruments::instruments::phq9::Severity;

const FORMAT_INSTRUCTIONS: &str = "\
Focus on practical, evidence-based activities that can help improve mental wellbeing.
Format as a bullet point list using • symbols, with one recommendation per line.
Keep each recommendation concise (under 15 words).";

/// Prompt for a finalized PHQ-9 result.
pub fn phq9_prompt(total: u8, severity: Severity) -> String {
    format!(
        "Generate 5 personalized recommendations for someone with {} (PHQ-9 score: {total}).\n\
         {FORMAT_INSTRUCTIONS}",
        severity.label()
    )
}

/// Prompt for a local-factors prediction.
///
/// The severity wording comes from the prediction and its confidence; the
/// confidence falls back to 50% when the service sent no probabilities.
pub fn prediction_prompt(kind: AssessmentKind, result: &PredictionResult) -> String {
    let severity = PredictionSeverity::from_prediction(result);
    let confidence = result.confidence_or_default();
    format!(
        "Generate 5 personalized recommendations for someone with {severity} {kind} \
         (confidence: {confidence:.1}%).\n\
         {FORMAT_INSTRUCTIONS}\n\
         Include a mix of immediate coping strategies and long-term wellness practices."
    )
}
