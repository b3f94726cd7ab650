//! Static pattern and keyword tables used by the heading heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("heading pattern must compile")
}

/// Leading patterns that mark heading-like text, in priority order.
///
/// Matched case-insensitively against the start of the text.
pub(crate) static HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(chapter)\s+\d+",
        r"(?i)^(section)\s+\d+",
        r"^\d+\.\s+",
        r"^\d+\.\d+\s+",
        r"^\d+\.\d+\.\d+\s+",
        r"(?i)^[IVX]+\.\s+",
        r"(?i)^[A-Z]\.\s+",
        r"(?i)^[a-z]\)\s+",
        r"^\(\d+\)\s+",
        r"^•\s+",
        r"^-\s+",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

/// Patterns that decide the level outright, in priority order.
///
/// Case-sensitive: only `Chapter`/`CHAPTER` and `Section`/`SECTION`.
pub(crate) static LEVEL_OVERRIDES: Lazy<Vec<(Regex, HeadingLevel)>> = Lazy::new(|| {
    [
        (r"^(Chapter|CHAPTER)\s+\d+", HeadingLevel::H1),
        (r"^(Section|SECTION)\s+\d+", HeadingLevel::H2),
        (r"^\d+\.\s+", HeadingLevel::H1),
        (r"^\d+\.\d+\s+", HeadingLevel::H2),
        (r"^\d+\.\d+\.\d+\s+", HeadingLevel::H3),
    ]
    .into_iter()
    .map(|(pattern, level)| (compile(pattern), level))
    .collect()
});

/// A numbered list item such as `3.` at the start of the text.
pub(crate) static NUMBERED_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^\d+\."));

/// Runs of whitespace.
pub(crate) static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

/// Words that commonly appear in section headings.
pub(crate) const HEADING_KEYWORDS: &[&str] = &[
    "introduction",
    "conclusion",
    "summary",
    "overview",
    "background",
    "methodology",
    "results",
    "discussion",
    "analysis",
    "findings",
    "recommendations",
    "references",
    "bibliography",
    "appendix",
    "abstract",
    "executive",
    "foreword",
    "preface",
    "acknowledgments",
];

/// Punctuation stripped from the end of heading text.
pub(crate) const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?'];

/// Collapse whitespace runs to one space and trim both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
