//! Normalisation of raw model output into the hint schema.

use serde_json::Value;
use tracing::warn;

use crate::common::utils::{extract_json_object, json_value_to_text};

pub const DEFAULT_CATEGORY: &str = "General";
pub const DEFAULT_SUMMARY: &str = "No summary available";
pub const DEFAULT_HINT: &str = "No hints available";

pub const FALLBACK_SUMMARY: &str = "Unable to analyze this problem automatically.";
pub const FALLBACK_HINTS: [&str; 3] = [
    "Try breaking down the problem into smaller parts",
    "Consider the time and space complexity requirements",
    "Think about edge cases and boundary conditions",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedHints {
    pub category: String,
    pub summary: String,
    pub hints: Vec<String>,
    /// No JSON object could be recovered, so static text was used.
    pub used_fallback: bool,
}

impl ParsedHints {
    fn fallback() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            summary: FALLBACK_SUMMARY.to_string(),
            hints: FALLBACK_HINTS.iter().map(|h| h.to_string()).collect(),
            used_fallback: true,
        }
    }
}

/// Parse model output, keeping at most `max_hints` hints.
///
/// Never fails: missing fields get defaults, and output without a JSON
/// object yields the static fallback.
pub fn parse_hints_response(raw: &str, max_hints: usize) -> ParsedHints {
    let parsed = extract_json_object(raw)
        .and_then(|json| serde_json::from_str::<Value>(json).ok())
        .filter(Value::is_object);

    let Some(value) = parsed else {
        warn!(raw_response = %raw, "Could not parse hints from LLM response, using fallback");
        return ParsedHints::fallback();
    };

    let hints = match value.get("hints") {
        Some(Value::Array(items)) => items
            .iter()
            .take(max_hints)
            .map(|item| json_value_to_text(item).trim().to_string())
            .collect(),
        _ => vec![DEFAULT_HINT.to_string()],
    };

    ParsedHints {
        category: non_empty_str(&value, "category").unwrap_or(DEFAULT_CATEGORY).to_string(),
        summary: non_empty_str(&value, "summary").unwrap_or(DEFAULT_SUMMARY).to_string(),
        hints,
        used_fallback: false,
    }
}

/// Trimmed, like hint items; whitespace-only counts as missing.
fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
