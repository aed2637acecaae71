//! Removal of formatting artifacts around model output.

/// Markdown code fence delimiter.
const FENCE: &str = "```";

/// Strips surrounding whitespace and any enclosing code fences.
///
/// An opening fence may carry a language tag (`json`, `JSON`, ...) which is
/// dropped with it. Opening and closing fences are removed independently so
/// truncated output (an opening fence with no closing one) is handled too.
/// Fences are peeled until nothing changes, which makes the function
/// idempotent. Text inside the outermost fences is never rewritten.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_fences(current).trim();
        if next.len() == current.len() {
            return current.to_owned();
        }
        current = next;
    }
}

fn strip_fences(text: &str) -> &str {
    let text = match text.strip_prefix(FENCE) {
        Some(rest) => &rest[language_tag_len(rest)..],
        None => text,
    };
    text.strip_suffix(FENCE).unwrap_or(text)
}

/// Length of a language tag directly after an opening fence.
///
/// A run of tag characters only counts as a tag when it is followed by
/// whitespace, the end of the text, or the start of a JSON value.
fn language_tag_len(rest: &str) -> usize {
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '+'))
        .unwrap_or(rest.len());
    match rest[end..].chars().next() {
        None => end,
        Some(c) if c.is_whitespace() || c == '{' || c == '[' => end,
        Some(_) => 0,
    }
}
