/// Pure utility functions for text handed to and received from the LLM.
///
/// These functions contain NO side effects, which keeps the prompt builders
/// and response normalisers easy to test.

/// Truncate to at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Slice from the first `{` to the last `}` inclusive.
///
/// Models often wrap the JSON they were asked for in prose or a markdown
/// fence; this recovers the outermost object without caring about either.
pub fn extract_json_object(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Render a JSON value as display text: strings verbatim, everything else
/// in its JSON form.
pub fn json_value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_chars_short_text_unchanged() {
        assert_eq!(truncate_chars("Two Sum", 100), "Two Sum");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("日本語のテキスト", 3), "日本語");
    }

    #[test]
    fn test_extract_json_object_strips_prose_and_fences() {
        let raw = "Sure! Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```\nGood luck.";
        assert_eq!(extract_json_object(raw), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_missing_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object("{ unterminated"), None);
    }

    #[test]
    fn test_json_value_to_text() {
        assert_eq!(json_value_to_text(&json!("  hint ")), "  hint ");
        assert_eq!(json_value_to_text(&json!(42)), "42");
        assert_eq!(json_value_to_text(&json!(true)), "true");
        assert_eq!(json_value_to_text(&json!({"k": 1})), "{\"k\":1}");
    }
}
