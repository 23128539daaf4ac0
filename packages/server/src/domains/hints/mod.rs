pub mod activities;
pub mod data;
pub mod parse;
pub mod prompt;

pub use data::{HintsPayload, HintsRequest, HintsResponse};
pub use parse::{parse_hints_response, ParsedHints};
pub use prompt::build_hints_prompt;
