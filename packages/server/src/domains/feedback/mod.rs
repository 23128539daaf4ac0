pub mod activities;
pub mod data;
pub mod parse;
pub mod prompt;
pub mod sanitize;

pub use data::{FeedbackPayload, FeedbackRequest, FeedbackResponse, RateFeedbackPayload};
pub use parse::{parse_debug_response, ParsedFeedback};
pub use prompt::build_debug_prompt;
pub use sanitize::sanitize_code;
