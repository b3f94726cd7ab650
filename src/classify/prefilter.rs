//! Cheap rejection of spans that cannot be headings.

use super::patterns::NUMBERED_PREFIX;

/// Shortest accepted heading, in characters after trimming.
pub const MIN_HEADING_CHARS: usize = 3;

/// Headings must be shorter than this many characters after trimming.
pub const MAX_HEADING_CHARS: usize = 200;

/// Most words a heading may contain.
pub const MAX_HEADING_WORDS: usize = 20;

/// Check if text could potentially be a heading.
///
/// Runs before scoring, so rejected spans never touch the font statistics.
pub fn is_candidate(text: &str) -> bool {
    let length = text.trim().chars().count();
    if length < MIN_HEADING_CHARS || length >= MAX_HEADING_CHARS {
        return false;
    }

    if text.split_whitespace().count() > MAX_HEADING_WORDS {
        return false;
    }

    // Lowercase starts are body text unless they open a numbered item.
    let starts_lowercase = text.chars().next().is_some_and(char::is_lowercase);
    if starts_lowercase && !NUMBERED_PREFIX.is_match(text) {
        return false;
    }

    true
}
