//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, appending `...`
/// when anything was cut.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// inside a code point.
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

/// Upper-case a snake_case token for display (`hate_speech` -> `HATE_SPEECH`).
pub fn shout(token: &str) -> String {
    token.to_uppercase()
}
