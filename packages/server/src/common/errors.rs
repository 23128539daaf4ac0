//! Errors raised by domain activities that callers must tell apart.
//!
//! Activities return `anyhow::Result`; the HTTP layer downcasts to these to
//! pick a status code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("No LLM provider is configured")]
    LlmNotConfigured,
}
