/// Collapse every whitespace run to a single space and trim both ends.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `limit` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Normalized, length-capped text content as stored on an element.
pub fn element_text(raw: &str, limit: usize) -> String {
    truncate_chars(&normalize_whitespace(raw), limit)
}
