use lazy_static::lazy_static;
use regex::Regex;

use crate::common::utils::truncate_chars;

pub const MAX_CODE_CHARS: usize = 10_000;

lazy_static! {
    // Whole <script> elements, including their body
    static ref SCRIPT_BLOCK_REGEX: Regex = Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap();

    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();

    static ref JS_PROTOCOL_REGEX: Regex = Regex::new(r"(?i)javascript:").unwrap();

    // Inline event handlers such as onclick= or onload =
    static ref EVENT_HANDLER_REGEX: Regex = Regex::new(r"(?i)\bon\w+\s*=").unwrap();
}

/// Strip markup that could be executed if the code is ever rendered, then
/// trim and cap the length.
pub fn sanitize_code(code: &str) -> String {
    let code = SCRIPT_BLOCK_REGEX.replace_all(code, "");
    let code = HTML_TAG_REGEX.replace_all(&code, "");
    let code = JS_PROTOCOL_REGEX.replace_all(&code, "");
    let code = EVENT_HANDLER_REGEX.replace_all(&code, "");

    truncate_chars(code.trim(), MAX_CODE_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_untouched() {
        let code = "def two_sum(nums, target):\n    seen = {}\n    return []";
        assert_eq!(sanitize_code(code), code);
    }

    #[test]
    fn test_script_blocks_removed() {
        let code = "x = 1\n<SCRIPT type=\"text/javascript\">\nalert('hi')\n</script>\ny = 2";
        assert_eq!(sanitize_code(code), "x = 1\n\ny = 2");
    }

    #[test]
    fn test_html_tags_removed() {
        assert_eq!(sanitize_code("<b>return</b> <img src=x>ans"), "return ans");
    }

    #[test]
    fn test_javascript_protocol_removed() {
        assert_eq!(sanitize_code("url = 'JavaScript:void(0)'"), "url = 'void(0)'");
    }

    #[test]
    fn test_event_handlers_removed() {
        assert_eq!(sanitize_code("onclick=run() onLoad = go()"), "run()  go()");
    }

    #[test]
    fn test_identifiers_containing_on_survive() {
        let code = "done = True\nbutton = 3";
        assert_eq!(sanitize_code(code), code);
    }

    #[test]
    fn test_trimmed_and_truncated() {
        let code = format!("   {}   ", "é".repeat(MAX_CODE_CHARS + 50));
        let sanitized = sanitize_code(&code);

        assert_eq!(sanitized.chars().count(), MAX_CODE_CHARS);
        assert!(sanitized.starts_with('é'));
    }
}
