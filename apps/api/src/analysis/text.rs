//! Small text helpers shared by the parsers and the suggestion engine.

/// Trimmed, non-empty lines. Handles both `\n` and `\r\n` endings.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// First `max_chars` characters of `text`. Never splits a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Like `truncate_chars`, with surrounding whitespace removed.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    truncate_chars(text, max_chars).trim()
}
