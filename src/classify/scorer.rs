//! Heuristic heading confidence.
//!
//! Each signal adds a fixed amount; signals are independent of each other
//! and never subtract, so the sum is clamped only from above.

use super::patterns::{HEADING_KEYWORDS, HEADING_PATTERNS};
use super::stats::FontStatistics;
use crate::model::TextSpan;

/// Record the span's font size, then score it.
///
/// The statistics used for this span already include the span itself.
pub fn score(span: &TextSpan, stats: &mut FontStatistics) -> f64 {
    stats.record(span.effective_font_size());
    score_with(span, stats)
}

/// Score a span against the statistics as they stand, without recording.
pub fn score_with(span: &TextSpan, stats: &FontStatistics) -> f64 {
    let text = span.text.trim();
    let font_size = span.effective_font_size();
    let mut confidence = 0.0;

    // Larger than the running average
    let avg_font_size = stats.average();
    if font_size > avg_font_size * 1.2 {
        confidence += 0.3;
    } else if font_size > avg_font_size * 1.1 {
        confidence += 0.2;
    }

    if span.flags.is_bold() {
        confidence += 0.2;
    }

    let font_lower = span.font_name.to_lowercase();
    if font_lower.contains("bold") || font_lower.contains("black") {
        confidence += 0.15;
    }
    if font_lower.contains("heading") || font_lower.contains("title") {
        confidence += 0.2;
    }

    if HEADING_PATTERNS.iter().any(|re| re.is_match(text)) {
        confidence += 0.3;
    }

    let text_lower = text.to_lowercase();
    if HEADING_KEYWORDS.iter().any(|kw| text_lower.contains(kw)) {
        confidence += 0.1;
    }

    // Top tenth of the page
    if span.relative_y() < 0.1 {
        confidence += 0.1;
    }

    let length = text.chars().count();
    if (10..=80).contains(&length) {
        confidence += 0.1;
    }

    if is_upper(text) {
        confidence += 0.1;
    } else if is_title_case(text) {
        confidence += 0.05;
    }

    f64::min(confidence, 1.0)
}

/// At least one cased character and no lowercase ones.
pub(crate) fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Uppercase letters only start words and lowercase letters only follow
/// cased ones, with at least one cased character.
pub(crate) fn is_title_case(text: &str) -> bool {
    let mut cased = false;
    let mut previous_is_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_is_cased {
                return false;
            }
            previous_is_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_is_cased {
                return false;
            }
            previous_is_cased = true;
            cased = true;
        } else {
            previous_is_cased = false;
        }
    }
    cased
}
