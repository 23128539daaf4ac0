use serde_json::Value;
use tracing::warn;

use crate::common::utils::{extract_json_object, json_value_to_text};

pub const DEFAULT_TIP: &str = "No specific debugging tips available";
pub const DEFAULT_EXAMPLE: &str = "Consider the problem constraints and edge cases";
pub const DEFAULT_SUGGESTION: &str = "Review your algorithm logic";

pub const FALLBACK_TIPS: [&str; 3] = [
    "Check for off-by-one errors in loops",
    "Verify edge cases and boundary conditions",
    "Ensure all variables are properly initialized",
];
pub const FALLBACK_EXAMPLE: &str = "Consider how your algorithm handles edge cases";
pub const FALLBACK_SUGGESTIONS: [&str; 2] = [
    "Add more test cases to verify your logic",
    "Consider the time complexity of your approach",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeedback {
    pub tips: Vec<String>,
    pub example: String,
    pub suggestions: Vec<String>,
    pub used_fallback: bool,
}

impl ParsedFeedback {
    fn fallback() -> Self {
        Self {
            tips: FALLBACK_TIPS.iter().map(|t| t.to_string()).collect(),
            example: FALLBACK_EXAMPLE.to_string(),
            suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            used_fallback: true,
        }
    }
}

/// Parse model output into tips (at most `max_tips`), an example and
/// suggestions. Never fails.
pub fn parse_debug_response(raw: &str, max_tips: usize) -> ParsedFeedback {
    let parsed = extract_json_object(raw)
        .and_then(|json| serde_json::from_str::<Value>(json).ok())
        .filter(Value::is_object);

    let Some(value) = parsed else {
        warn!(raw_response = %raw, "Could not parse debug feedback from LLM response, using fallback");
        return ParsedFeedback::fallback();
    };

    let tips = text_list(&value, "tips", max_tips)
        .unwrap_or_else(|| vec![DEFAULT_TIP.to_string()]);
    let suggestions = text_list(&value, "suggestions", usize::MAX)
        .unwrap_or_else(|| vec![DEFAULT_SUGGESTION.to_string()]);
    let example = value
        .get("example")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_EXAMPLE)
        .to_string();

    ParsedFeedback {
        tips,
        example,
        suggestions,
        used_fallback: false,
    }
}

/// `None` unless `key` holds an array.
fn text_list(value: &Value, key: &str, max: usize) -> Option<Vec<String>> {
    value.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .take(max)
            .map(|item| json_value_to_text(item).trim().to_string())
            .collect()
    })
}
