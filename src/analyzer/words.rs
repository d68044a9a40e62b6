//! Word tokenization

/// Count maximal runs of non-whitespace characters.
///
/// Punctuation stays attached to its token, so `"hyphen-word here"` and
/// `"gut, oder?"` both count two words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Strip leading and trailing punctuation from a whitespace token.
/// Returns `None` when nothing alphanumeric is left.
pub(crate) fn letters_only(token: &str) -> Option<&str> {
    let trimmed = token.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
