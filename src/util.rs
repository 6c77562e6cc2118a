//! Shared utility functions.

/// Maximum length (in characters) of a teaser description.
pub const TEASER_LIMIT: usize = 140;

/// Marker appended to a truncated teaser description.
pub const ELLIPSIS: &str = "...";

/// Convert a tag to the slug used in tag page file names.
///
/// Lowercases and replaces every whitespace character with `-`.
/// "Web Dev" -> "web-dev"
/// "Rust  Tips" -> "rust--tips"
pub fn tag_slug(tag: &str) -> String {
    tag.to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Escape a value for use inside a double-quoted HTML attribute.
///
/// Content is author-trusted, so this only keeps values from breaking out of
/// their attribute; it is not a sanitizer.
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shorten a description to [`TEASER_LIMIT`] characters.
///
/// Text within the limit is returned verbatim. Longer text is cut at the last
/// space at or before the limit and suffixed with [`ELLIPSIS`]; text with no
/// such space is cut hard at the limit.
pub fn truncate_text(text: &str) -> String {
    if text.chars().count() <= TEASER_LIMIT {
        return text.to_string();
    }

    // Byte offset of the character just past the limit (or the end).
    let limit = text
        .char_indices()
        .nth(TEASER_LIMIT + 1)
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    let cut = match text[..limit].rfind(' ') {
        Some(space) => space,
        None => text
            .char_indices()
            .nth(TEASER_LIMIT)
            .map(|(i, _)| i)
            .unwrap_or(text.len()),
    };

    format!("{}{}", &text[..cut], ELLIPSIS)
}
