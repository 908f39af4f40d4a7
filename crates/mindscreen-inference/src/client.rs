//! Blocking HTTP transport shared by the prediction, recommendation, and
//! news collaborators.
//!
//! Requests run on tokio's blocking pool so async callers are never stalled
//! by the socket. Every request is bounded by the configured timeout.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::InferenceError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body the prediction service sends alongside a failure status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path like `/anxiety` against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST a JSON body and return the raw response text of a 2xx reply.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<String, InferenceError> {
        let agent = self.agent.clone();
        let url = self.url(path);
        let payload = serde_json::to_string(body)?;

        run_blocking(url.clone(), move || {
            debug!(url = %url, "POST");
            let response = agent
                .post(&url)
                .header("Content-Type", "application/json")
                .send(payload.as_str());
            read_response(&url, response)
        })
        .await
    }

    /// GET an absolute URL with query parameters and return the raw response
    /// text of a 2xx reply.
    pub async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<String, InferenceError> {
        let agent = self.agent.clone();
        let url = url.to_string();

        run_blocking(url.clone(), move || {
            debug!(url = %url, "GET");
            let mut request = agent.get(&url);
            for (key, value) in &query {
                request = request.query(key, value);
            }
            read_response(&url, request.call())
        })
        .await
    }
}

async fn run_blocking<F>(endpoint: String, f: F) -> Result<String, InferenceError>
where
    F: FnOnce() -> Result<String, InferenceError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| InferenceError::Network {
            endpoint,
            message: format!("request task failed: {e}"),
        })?
}

fn read_response(
    url: &str,
    response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<String, InferenceError> {
    let mut response = response.map_err(|e| {
        warn!(url, error = %e, "request failed");
        InferenceError::Network {
            endpoint: url.to_string(),
            message: e.to_string(),
        }
    })?;

    let status = response.status();
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| InferenceError::Network {
            endpoint: url.to_string(),
            message: format!("failed to read response body: {e}"),
        })?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        warn!(url, status = status.as_u16(), "service returned error status");
        return Err(InferenceError::Status {
            endpoint: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    Ok(text)
}
