//! Server dependencies for handlers and activities (using traits for testability)
//!
//! All external services sit behind trait objects so tests can swap in mocks.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AssistantSettings;
use crate::kernel::BaseLlm;

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to route handlers and domain activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Completion backend for hints and debug feedback.
    pub llm: Arc<dyn BaseLlm>,
    pub settings: AssistantSettings,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(db_pool: PgPool, llm: Arc<dyn BaseLlm>, settings: AssistantSettings) -> Self {
        Self {
            db_pool,
            llm,
            settings,
        }
    }
}
