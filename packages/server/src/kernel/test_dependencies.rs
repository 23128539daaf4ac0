// Mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use llm_client::{LlmError, Provider, Result};
use std::sync::{Arc, Mutex};

use super::BaseLlm;

// =============================================================================
// Mock LLM
// =============================================================================

/// A prompt captured by [`MockLlm`].
#[derive(Debug, Clone)]
pub struct LlmCall {
    pub provider: Provider,
    pub prompt: String,
}

pub struct MockLlm {
    providers: Vec<Provider>,
    default_provider: Provider,
    responses: Arc<Mutex<Vec<Result<String>>>>,
    calls: Arc<Mutex<Vec<LlmCall>>>,
}

impl MockLlm {
    /// Mock with both providers configured and Gemini as default.
    pub fn new() -> Self {
        Self {
            providers: Provider::ALL.to_vec(),
            default_provider: Provider::Gemini,
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock with no provider configured.
    pub fn unconfigured() -> Self {
        Self::new().with_providers(Vec::new())
    }

    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_default_provider(mut self, provider: Provider) -> Self {
        self.default_provider = provider;
        self
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.with_response(json)
    }

    /// Make the next call fail with `error`
    pub fn with_error(self, error: LlmError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Get all prompts that were sent
    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|c| c.prompt.clone())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseLlm for MockLlm {
    fn available_providers(&self) -> Vec<Provider> {
        self.providers.clone()
    }

    fn default_provider(&self) -> Provider {
        self.default_provider
    }

    async fn complete(&self, provider: Provider, prompt: &str) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(LlmCall {
            provider,
            prompt: prompt.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            Ok("Mock LLM response".to_string())
        }
    }
}
