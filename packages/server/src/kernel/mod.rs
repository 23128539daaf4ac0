//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod llm;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use llm::LlmRouter;
pub use test_dependencies::{LlmCall, MockLlm};
pub use traits::*;
