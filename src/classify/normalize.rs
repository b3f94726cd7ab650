//! Heading text cleanup.

use super::patterns::{collapse_whitespace, NUMBERED_PREFIX, TRAILING_PUNCTUATION};

/// Clean and normalize heading text.
///
/// Whitespace runs become single spaces and the ends are trimmed. Trailing
/// punctuation is removed unless the text opens with a numbered prefix such
/// as `1.`, in which case the text is left as is.
pub fn clean_heading_text(text: &str) -> String {
    let text = collapse_whitespace(text);

    if NUMBERED_PREFIX.is_match(&text) {
        return text;
    }

    // Whitespace left between stripped marks goes too, e.g. "Scope . ."
    text.trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}
