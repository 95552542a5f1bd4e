//! Pull JSON fragments out of free-form model replies.
//!
//! Models asked for JSON often wrap it in prose or a Markdown code fence.
//! These helpers find the first balanced `[...]` or `{...}` fragment that
//! parses as the requested type.

use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;

fn code_fence() -> &'static Regex {
    static CODE_FENCE: OnceLock<Regex> = OnceLock::new();
    CODE_FENCE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("valid regex"))
}

/// Return the first fenced block's body if the text has one, else the text.
fn unfence(text: &str) -> &str {
    code_fence()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Byte ranges of every balanced fragment opened by `open`, in order.
///
/// Brackets inside JSON strings are ignored.
fn balanced_fragments(text: &str, open: u8, close: u8) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut fragments = Vec::new();

    for start in (0..bytes.len()).filter(|&i| bytes[i] == open) {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for (offset, &b) in bytes[start..].iter().enumerate() {
            if in_string {
                match b {
                    _ if escaped => escaped = false,
                    b'\\' => escaped = true,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match b {
                b'"' => in_string = true,
                _ if b == open => depth += 1,
                _ if b == close => {
                    depth -= 1;
                    if depth == 0 {
                        fragments.push((start, start + offset + 1));
                        break;
                    }
                }
                _ => {}
            }
        }
    }
    fragments
}

fn extract<T: DeserializeOwned>(text: &str, open: u8, close: u8) -> Option<T> {
    let body = unfence(text);
    balanced_fragments(body, open, close)
        .into_iter()
        .find_map(|(start, end)| serde_json::from_str::<T>(&body[start..end]).ok())
}

/// First JSON array in `text` that deserializes as `T`.
pub fn extract_json_array<T: DeserializeOwned>(text: &str) -> Option<T> {
    extract(text, b'[', b']')
}

/// First JSON object in `text` that deserializes as `T`.
pub fn extract_json_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    extract(text, b'{', b'}')
}

/// First JSON array of strings, trimmed, with blank entries dropped.
/// `None` if there is no such array or it holds no usable lines.
pub fn extract_string_list(text: &str) -> Option<Vec<String>> {
    let lines: Vec<String> = extract_json_array::<Vec<String>>(text)?
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    (!lines.is_empty()).then_some(lines)
}
