// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompt building and response normalisation live in the hints/feedback domains.

use async_trait::async_trait;
use llm_client::{Provider, Result};

// =============================================================================
// LLM Trait (Infrastructure - text completion across providers)
// =============================================================================

#[async_trait]
pub trait BaseLlm: Send + Sync {
    /// Providers that have credentials configured.
    fn available_providers(&self) -> Vec<Provider>;

    /// Provider used when the caller expresses no preference.
    fn default_provider(&self) -> Provider;

    fn is_configured(&self) -> bool {
        !self.available_providers().is_empty()
    }

    /// Pick the provider for a request: the preferred one if it is configured,
    /// then the default, then whichever is available. `None` when no provider
    /// is configured at all.
    fn resolve_provider(&self, preferred: Option<Provider>) -> Option<Provider> {
        let available = self.available_providers();
        preferred
            .filter(|p| available.contains(p))
            .or_else(|| Some(self.default_provider()).filter(|p| available.contains(p)))
            .or_else(|| available.first().copied())
    }

    /// Complete a prompt with the given provider (returns raw text response)
    async fn complete(&self, provider: Provider, prompt: &str) -> Result<String>;
}
