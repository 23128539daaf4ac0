// CodeSensei API core
//
// Backend for the CodeSensei browser extension: progressive hints and debug
// feedback from an LLM, cached per problem, plus learner progress analytics.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
