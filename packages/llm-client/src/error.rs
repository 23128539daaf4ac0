//! Error types for the LLM clients.

use thiserror::Error;

/// Result type for LLM client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, unsupported provider)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection refused, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// The provider did not answer within the configured timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// API error (non-2xx response, empty candidate list)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (response body is not the expected shape)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LlmError {
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LlmError::Timeout(error.to_string())
        } else {
            LlmError::Network(error.to_string())
        }
    }
}
