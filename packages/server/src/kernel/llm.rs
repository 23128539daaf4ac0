//! Routes completions to the configured Gemini / OpenAI client.

use std::time::Duration;

use async_trait::async_trait;
use llm_client::{
    ChatRequest, GeminiClient, GenerateContentRequest, LlmError, Message, OpenAIClient, Provider,
    Result,
};
use tracing::debug;

use super::BaseLlm;
use crate::Config;

const OPENAI_SYSTEM_PROMPT: &str =
    "You are CodeSensei, an AI mentor who helps with coding problems. Always respond with valid JSON.";

/// Provider-aware completion backed by the real HTTP clients.
pub struct LlmRouter {
    gemini: Option<GeminiClient>,
    openai: Option<OpenAIClient>,
    openai_model: String,
    default_provider: Provider,
}

impl LlmRouter {
    pub fn new(
        gemini: Option<GeminiClient>,
        openai: Option<OpenAIClient>,
        openai_model: impl Into<String>,
        default_provider: Provider,
    ) -> Self {
        Self {
            gemini,
            openai,
            openai_model: openai_model.into(),
            default_provider,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.llm_timeout_secs);

        let gemini = config.gemini_api_key.as_ref().map(|key| {
            GeminiClient::new(key.clone())
                .with_model(config.gemini_model.clone())
                .with_timeout(timeout)
        });
        let openai = config
            .openai_api_key
            .as_ref()
            .map(|key| OpenAIClient::new(key.clone()).with_timeout(timeout));

        Self::new(
            gemini,
            openai,
            config.openai_model.clone(),
            config.assistant.default_provider,
        )
    }
}

#[async_trait]
impl BaseLlm for LlmRouter {
    fn available_providers(&self) -> Vec<Provider> {
        let mut providers = Vec::new();
        if self.gemini.is_some() {
            providers.push(Provider::Gemini);
        }
        if self.openai.is_some() {
            providers.push(Provider::OpenAi);
        }
        providers
    }

    fn default_provider(&self) -> Provider {
        self.default_provider
    }

    async fn complete(&self, provider: Provider, prompt: &str) -> Result<String> {
        debug!(%provider, prompt_chars = prompt.len(), "LLM completion");

        match provider {
            Provider::Gemini => {
                let client = self
                    .gemini
                    .as_ref()
                    .ok_or_else(|| LlmError::Config("Gemini API key not configured".into()))?;
                client
                    .generate_content(GenerateContentRequest::from_prompt(prompt))
                    .await
            }
            Provider::OpenAi => {
                let client = self
                    .openai
                    .as_ref()
                    .ok_or_else(|| LlmError::Config("OpenAI API key not configured".into()))?;
                let request = ChatRequest::new(self.openai_model.clone())
                    .message(Message::system(OPENAI_SYSTEM_PROMPT))
                    .message(Message::user(prompt))
                    .temperature(0.7)
                    .max_tokens(1024);
                client.chat_completion(request).await.map(|r| r.content)
            }
        }
    }
}
