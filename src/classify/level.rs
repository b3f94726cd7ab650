//! Heading level classification.

use super::patterns::LEVEL_OVERRIDES;
use super::stats::FontStatistics;
use crate::model::HeadingLevel;

/// Font size cutoffs for the three heading levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelThresholds {
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
}

impl LevelThresholds {
    /// Fixed cutoffs used before any font size was observed.
    pub const FALLBACK: LevelThresholds = LevelThresholds {
        h1: 16.0,
        h2: 14.0,
        h3: 12.0,
    };

    /// Cutoffs scaled to the document's running average, never below the
    /// fixed fallbacks.
    pub fn adaptive(stats: &FontStatistics) -> Self {
        if stats.is_empty() {
            return Self::FALLBACK;
        }
        let avg = stats.average();
        Self {
            h1: f64::max(avg * 1.4, Self::FALLBACK.h1),
            h2: f64::max(avg * 1.2, Self::FALLBACK.h2),
            h3: f64::max(avg * 1.1, Self::FALLBACK.h3),
        }
    }
}

/// Level decided by the leading text alone, if any.
pub fn lexical_level(text: &str) -> Option<HeadingLevel> {
    LEVEL_OVERRIDES
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, level)| *level)
}

/// Classify the heading level (H1, H2, H3) of an accepted span.
///
/// Numbering such as `Chapter 2` or `1.2` decides the level regardless of
/// size or confidence. Otherwise the size is compared against adaptive
/// cutoffs, falling back to confidence bands alone.
pub fn classify_level(
    text: &str,
    font_size: f64,
    confidence: f64,
    stats: &FontStatistics,
) -> Option<HeadingLevel> {
    if let Some(level) = lexical_level(text) {
        return Some(level);
    }

    let thresholds = LevelThresholds::adaptive(stats);
    if font_size >= thresholds.h1 && confidence > 0.5 {
        Some(HeadingLevel::H1)
    } else if font_size >= thresholds.h2 && confidence > 0.4 {
        Some(HeadingLevel::H2)
    } else if font_size >= thresholds.h3 && confidence > 0.3 {
        Some(HeadingLevel::H3)
    } else if confidence > 0.5 {
        Some(HeadingLevel::H2)
    } else if confidence > 0.4 {
        Some(HeadingLevel::H3)
    } else {
        None
    }
}
