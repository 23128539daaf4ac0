//! Gemini `generateContent` client.

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};

use crate::types::{GenerateContentRequest, GenerateContentResponse};
use crate::{LlmError, Result, DEFAULT_TIMEOUT};

/// Minimal Google Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client for the `gemini-pro` model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate text and return the first candidate's first part.
    pub async fn generate_content(&self, request: GenerateContentRequest) -> Result<String> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The key is a query parameter; never log the URL.
                let e = e.without_url();
                warn!(error = %e, "Gemini request failed");
                LlmError::from_reqwest(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(LlmError::Api(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.without_url().to_string()))?;

        let text = body
            .first_text()
            .ok_or_else(|| LlmError::Api("No candidates returned by Gemini".into()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generate content"
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new("key")
            .with_base_url("http://localhost:9999/v1beta")
            .with_model("gemini-1.5-flash");

        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_hides_api_key() {
        let client = GeminiClient::new("secret-key").with_base_url("http://127.0.0.1:1");

        let err = client
            .generate_content(GenerateContentRequest::from_prompt("hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Network(_) | LlmError::Timeout(_)));
        assert!(!err.to_string().contains("secret-key"));
    }
}
