//! Recommendation generation.
//!
//! The generator is an opaque text service: we send a prompt and get back
//! bullet- or newline-delimited text, which is split into individual
//! suggestions. A built-in list stands in when the reply is unusable, so a
//! finished assessment always comes with some suggestions.

use std::future::Future;

use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::{PredictionResult, PredictionSeverity};
use mindscreen_core::models::recommendation::{RecommendationOrigin, RecommendationSet};
use mindscreen_instruments::instruments::phq9::Severity;
use tracing::{info, warn};

use crate::client::HttpClient;
use crate::error::InferenceError;
use crate::{fallback, prompt};

pub const GENERATE_PATH: &str = "/generate";

/// Fields the generator may put its text in, in order of preference.
const TEXT_FIELDS: [&str; 3] = ["response", "text", "recommendations"];

pub trait TextGenerator: Send + Sync {
    /// Send a prompt and return the generated text.
    fn generate(&self, prompt: &str)
    -> impl Future<Output = Result<String, InferenceError>> + Send;
}

/// [`TextGenerator`] backed by the HTTP generation endpoint.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: HttpClient,
}

impl HttpTextGenerator {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = serde_json::json!({ "prompt": prompt });
        let text = self.client.post_json(GENERATE_PATH, &body).await?;
        extract_text(GENERATE_PATH, &text)
    }
}

/// Pull the generated text out of a generator reply.
///
/// Accepts the first non-blank string among `response`, `text` and
/// `recommendations`.
pub fn extract_text(endpoint: &str, body: &str) -> Result<String, InferenceError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| InferenceError::malformed(endpoint, format!("invalid JSON: {e}")))?;

    TEXT_FIELDS
        .iter()
        .find_map(|field| {
            value
                .get(field)
                .and_then(|v| v.as_str())
                .filter(|text| !text.trim().is_empty())
        })
        .map(str::to_string)
        .ok_or_else(|| {
            let detail = value
                .get("error")
                .and_then(|v| v.as_str())
                .map(|e| format!("generator error: {e}"))
                .unwrap_or_else(|| "no response text in reply".to_string());
            InferenceError::malformed(endpoint, detail)
        })
}

/// Split generated text on `•` and newlines, trimming each piece and
/// dropping empty ones.
pub fn split_recommendations(text: &str) -> Vec<String> {
    text.split(['•', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_items(text: &str) -> Result<Vec<String>, InferenceError> {
    let items = split_recommendations(text);
    if items.is_empty() {
        return Err(InferenceError::malformed(
            GENERATE_PATH,
            "response text contained no recommendations",
        ));
    }
    Ok(items)
}

/// Recommendations for a finalized PHQ-9 result.
///
/// Never fails: any generator problem, network or otherwise, falls back to
/// the built-in list for the score band.
pub async fn recommend_for_phq9<G: TextGenerator>(
    generator: &G,
    total: u8,
    severity: Severity,
) -> RecommendationSet {
    let prompt = prompt::phq9_prompt(total, severity);
    let generated = match generator.generate(&prompt).await {
        Ok(text) => parse_items(&text),
        Err(e) => Err(e),
    };

    match generated {
        Ok(items) => {
            info!(count = items.len(), "phq9 recommendations generated");
            RecommendationSet {
                items,
                origin: RecommendationOrigin::Generated,
                severity: severity.label().to_string(),
                confidence: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "falling back to built-in phq9 recommendations");
            RecommendationSet {
                items: fallback::for_score(total),
                origin: RecommendationOrigin::Fallback,
                severity: severity.label().to_string(),
                confidence: None,
            }
        }
    }
}

/// Recommendations for a local-factors prediction.
///
/// Network failures are returned so the caller can offer a retry. A reply
/// that arrives but cannot be used falls back to the built-in list for the
/// prediction's severity.
pub async fn recommend_for_prediction<G: TextGenerator>(
    generator: &G,
    kind: AssessmentKind,
    result: &PredictionResult,
) -> Result<RecommendationSet, InferenceError> {
    let severity = PredictionSeverity::from_prediction(result);
    let confidence = result.confidence_or_default();
    let prompt = prompt::prediction_prompt(kind, result);

    let generated = match generator.generate(&prompt).await {
        Ok(text) => parse_items(&text),
        Err(e) if e.is_network() => {
            warn!(error = %e, %kind, "recommendation request failed");
            return Err(e);
        }
        Err(e) => Err(e),
    };

    let (items, origin) = match generated {
        Ok(items) => (items, RecommendationOrigin::Generated),
        Err(e) => {
            warn!(error = %e, %kind, "falling back to built-in recommendations");
            (fallback::for_prediction(severity), RecommendationOrigin::Fallback)
        }
    };

    info!(%kind, %severity, count = items.len(), ?origin, "recommendations ready");

    Ok(RecommendationSet {
        items,
        origin,
        severity: severity.to_string(),
        confidence: Some(confidence),
    })
}
