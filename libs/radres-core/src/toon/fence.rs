//! Cleanup for generated TOON fragments.
//!
//! Completion output tends to arrive wrapped in fenced code blocks, and new
//! fragments are concatenated onto an existing document over time.

use chrono::NaiveDate;

/// Language tags that may follow an opening fence.
const FENCE_TAGS: [&str; 2] = ["toon", "json"];

/// Return the body of the first fenced block, or the trimmed text when there
/// is no fence.
pub fn strip_code_fence(text: &str) -> &str {
    let Some((_, after_open)) = text.split_once("```") else {
        return text.trim();
    };
    let body = after_open
        .split_once("```")
        .map_or(after_open, |(body, _)| body);

    let body = body.trim_start();
    let body = FENCE_TAGS
        .iter()
        .find_map(|tag| {
            body.strip_prefix(tag)
                .filter(|rest| rest.starts_with(char::is_whitespace))
        })
        .unwrap_or(body);
    body.trim()
}

/// Append a generated fragment to an existing document, or start a new one
/// with a metadata header.
pub fn append_fragment(existing: Option<&str>, fragment: &str, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d");
    match existing {
        Some(existing) => format!("{existing}\n\n# Added on {date}\n{fragment}"),
        None => format!("metadata:\n  version: 1.0.0\n  last_updated: {date}\n\n{fragment}"),
    }
}
