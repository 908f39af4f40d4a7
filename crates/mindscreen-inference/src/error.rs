use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The request never produced a response (connection refused, timeout,
    /// DNS failure).
    #[error("request to {endpoint} failed: {message}")]
    Network { endpoint: String, message: String },

    /// The service answered with a non-success status.
    #[error("{message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The service answered, but not with the shape we expect.
    #[error("malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl InferenceError {
    /// Transport failures and error statuses are shown with a retry action.
    pub fn is_network(&self) -> bool {
        matches!(self, InferenceError::Network { .. } | InferenceError::Status { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, InferenceError::MalformedResponse { .. })
    }

    pub(crate) fn malformed(endpoint: &str, message: impl Into<String>) -> Self {
        InferenceError::MalformedResponse {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }
}
