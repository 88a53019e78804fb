//! Lenient JSON extraction from model output.

use serde_json::Value;

/// Parses the JSON object in `content`.
///
/// Accepts bare JSON, JSON inside a markdown code fence, and JSON surrounded by prose (the
/// outermost `{...}` span). Returns `None` when no object parses.
pub fn extract_json_object(content: &str) -> Option<Value> {
    let trimmed = content.trim();
    let candidates = [
        Some(trimmed),
        strip_code_fence(trimmed),
        outer_braces(trimmed),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|c| serde_json::from_str::<Value>(c).ok().filter(Value::is_object))
}

fn strip_code_fence(s: &str) -> Option<&str> {
    let rest = s.strip_prefix("```")?;
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    let end = rest.rfind("```")?;
    Some(rest[..end].trim())
}

fn outer_braces(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (start < end).then(|| &s[start..=end])
}
