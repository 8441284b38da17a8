//! Helpers for coaxing structured JSON out of LLM responses.
//!
//! Validation and coercion happen once, at the parsing boundary of each
//! collaborator call; nothing downstream re-checks these fields.

use serde_json::Value;

/// Strip a surrounding markdown code fence, if present. Models regularly wrap
/// the JSON they were told not to wrap.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        rest.trim_end_matches("```").trim()
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest.trim_end_matches("```").trim()
    } else {
        trimmed
    }
}

/// Locate the first brace-delimited object substring: everything from the
/// first `{` to the last `}`. Used as a second-chance parse when a response
/// buries its JSON in prose.
pub fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalize a confidence field: anything non-numeric or outside [0, 1]
/// becomes 0.5 rather than propagating.
pub fn normalize_confidence(value: &Value) -> f64 {
    match value.as_f64() {
        Some(c) if (0.0..=1.0).contains(&c) => c,
        _ => 0.5,
    }
}

/// Coerce a field that must be a list of strings; anything else becomes the
/// empty list.
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_json_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn extracts_embedded_object() {
        assert_eq!(
            extract_object("Sure! Here you go: {\"a\": {\"b\": 2}} Hope that helps."),
            Some("{\"a\": {\"b\": 2}}")
        );
        assert_eq!(extract_object("no json here"), None);
        assert_eq!(extract_object("} backwards {"), None);
    }

    #[test]
    fn confidence_out_of_range_becomes_half() {
        assert_eq!(normalize_confidence(&json!(1.5)), 0.5);
        assert_eq!(normalize_confidence(&json!(-0.1)), 0.5);
        assert_eq!(normalize_confidence(&json!("high")), 0.5);
        assert_eq!(normalize_confidence(&json!(null)), 0.5);
        assert_eq!(normalize_confidence(&json!(0.8)), 0.8);
        assert_eq!(normalize_confidence(&json!(1)), 1.0);
    }

    #[test]
    fn coerces_non_lists_to_empty() {
        assert_eq!(
            coerce_string_list(&json!(["Whisk", "Knife"])),
            vec!["Whisk".to_string(), "Knife".to_string()]
        );
        assert!(coerce_string_list(&json!("Whisk")).is_empty());
        assert!(coerce_string_list(&json!(null)).is_empty());
    }
}
