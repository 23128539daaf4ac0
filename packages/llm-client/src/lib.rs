//! REST clients for the LLM providers the assistant can use.
//!
//! Two thin clients with no domain logic: [`OpenAIClient`] for the
//! chat-completions API and [`GeminiClient`] for `generateContent`.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{ChatRequest, GeminiClient, GenerateContentRequest, Message, OpenAIClient};
//!
//! let openai = OpenAIClient::new(std::env::var("OPENAI_API_KEY")?);
//! let response = openai
//!     .chat_completion(ChatRequest::new("gpt-4").message(Message::user("Hello!")))
//!     .await?;
//!
//! let gemini = GeminiClient::new(std::env::var("GEMINI_API_KEY")?).with_model("gemini-pro");
//! let text = gemini
//!     .generate_content(GenerateContentRequest::from_prompt("Hello!"))
//!     .await?;
//! ```

pub mod error;
pub mod gemini;
pub mod openai;
pub mod provider;
pub mod types;

pub use error::{LlmError, Result};
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use provider::Provider;
pub use types::*;

use std::time::Duration;

/// Upper bound on a single provider round-trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
