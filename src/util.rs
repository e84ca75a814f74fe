/// Truncate display text to `max_chars` characters, marking the cut.
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept = text
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    format!("{kept}…")
}

/// Whether an id addresses a multi-character compound rather than a single
/// grapheme.
pub fn is_compound_id(id: &str) -> bool {
    id.chars().count() > 1
}
