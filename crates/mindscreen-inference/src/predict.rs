//! Prediction service collaborator.
//!
//! The service exposes one endpoint per model. Each takes a flat JSON object
//! and answers with `{prediction: 0|1, probability?: [..]}`.

use std::future::Future;

use mindscreen_core::models::kind::AssessmentKind;
use mindscreen_core::models::prediction::PredictionResult;
use mindscreen_instruments::instruments::local_factors::AnswerMap;
use mindscreen_instruments::instruments::student::StudentPredictionRequest;
use tracing::info;

use crate::client::HttpClient;
use crate::error::InferenceError;

pub const STUDENT_PATH: &str = "/predict";

pub fn assessment_path(kind: AssessmentKind) -> &'static str {
    match kind {
        AssessmentKind::Anxiety => "/anxiety",
        AssessmentKind::Depression => "/depression",
    }
}

pub trait Predictor: Send + Sync {
    fn predict_student(
        &self,
        request: &StudentPredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, InferenceError>> + Send;

    fn predict_assessment(
        &self,
        kind: AssessmentKind,
        answers: &AnswerMap,
    ) -> impl Future<Output = Result<PredictionResult, InferenceError>> + Send;
}

/// [`Predictor`] backed by the HTTP prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: HttpClient,
}

impl HttpPredictor {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<PredictionResult, InferenceError> {
        let text = self.client.post_json(path, &body).await?;
        let result = parse_prediction(path, &text)?;
        info!(
            endpoint = path,
            prediction = result.prediction,
            confidence = result.confidence(),
            "prediction received"
        );
        Ok(result)
    }
}

impl Predictor for HttpPredictor {
    async fn predict_student(
        &self,
        request: &StudentPredictionRequest,
    ) -> Result<PredictionResult, InferenceError> {
        self.post(STUDENT_PATH, serde_json::to_value(request)?).await
    }

    async fn predict_assessment(
        &self,
        kind: AssessmentKind,
        answers: &AnswerMap,
    ) -> Result<PredictionResult, InferenceError> {
        self.post(assessment_path(kind), answers.to_json()).await
    }
}

/// Parse and sanity-check a prediction body.
pub fn parse_prediction(endpoint: &str, text: &str) -> Result<PredictionResult, InferenceError> {
    let result: PredictionResult = serde_json::from_str(text)
        .map_err(|e| InferenceError::malformed(endpoint, format!("{e}. Response: {text}")))?;
    result
        .validate()
        .map_err(|e| InferenceError::malformed(endpoint, e.to_string()))?;
    Ok(result)
}
