pub mod organization;
pub mod repository;
pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use organization::*;
pub use repository::*;
pub use user::*;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownContent(pub String);

impl MarkdownContent {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for MarkdownContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Result trees come straight from the API, so every field may be missing or
// null. Renderers read them through these accessors only.

/// Value at `pointer`, treating JSON `null` as absent
pub fn field<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    value.pointer(pointer).filter(|v| !v.is_null())
}

/// Text of a scalar field, `N/A` when missing, null or an empty string
pub fn text_field(value: &Value, pointer: &str) -> String {
    match field(value, pointer) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::String(_)) | None => NOT_AVAILABLE.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn optional_text_field<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    field(value, pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn count_field(value: &Value, pointer: &str) -> u64 {
    field(value, pointer).and_then(Value::as_u64).unwrap_or(0)
}

pub fn flag_field(value: &Value, pointer: &str) -> bool {
    field(value, pointer).and_then(Value::as_bool).unwrap_or(false)
}

pub fn array_field<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    field(value, pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Timestamp field rendered as `%Y-%m-%d %H:%M:%S UTC`.
/// Values that are not RFC 3339 are shown as they are.
pub fn timestamp_field(value: &Value, pointer: &str) -> String {
    match optional_text_field(value, pointer) {
        Some(raw) => format_timestamp(raw),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// First `max_chars` characters on a single line
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Escapes characters that would break a Markdown table cell
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaulting_accessors() {
        let value = json!({
            "name": "gitsome",
            "description": null,
            "homepageUrl": "",
            "diskUsage": 42,
            "isFork": true,
            "refs": {"totalCount": 3, "nodes": [{"name": "main"}]}
        });

        assert_eq!(text_field(&value, "/name"), "gitsome");
        assert_eq!(text_field(&value, "/description"), "N/A");
        assert_eq!(text_field(&value, "/homepageUrl"), "N/A");
        assert_eq!(text_field(&value, "/missing"), "N/A");
        assert_eq!(text_field(&value, "/diskUsage"), "42");
        assert_eq!(count_field(&value, "/refs/totalCount"), 3);
        assert_eq!(count_field(&value, "/description"), 0);
        assert!(flag_field(&value, "/isFork"));
        assert!(!flag_field(&value, "/isMirror"));
        assert_eq!(array_field(&value, "/refs/nodes").len(), 1);
        assert!(array_field(&value, "/description").is_empty());
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-03-01T12:30:00Z"),
            "2024-03-01 12:30:00 UTC"
        );
        assert_eq!(
            format_timestamp("2024-03-01T21:30:00+09:00"),
            "2024-03-01 12:30:00 UTC"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_preview_is_char_based() {
        assert_eq!(preview("line one\nline two", 12), "line one lin");
        assert_eq!(preview("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_table_cell_escapes_pipes() {
        assert_eq!(table_cell("a | b\nc"), "a \\| b c");
    }
}
