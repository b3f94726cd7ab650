//! Heading and title classification.
//!
//! The per-span pipeline is prefilter → score → level → cleanup, driven by a
//! [`HeadingClassifier`] that owns the document's [`FontStatistics`]. Title
//! resolution is a separate one-shot pass over the first page.

mod level;
mod normalize;
mod patterns;
mod prefilter;
mod scorer;
mod stats;
mod title;

pub use level::{classify_level, lexical_level, LevelThresholds};
pub use normalize::clean_heading_text;
pub use prefilter::{is_candidate, MAX_HEADING_CHARS, MAX_HEADING_WORDS, MIN_HEADING_CHARS};
pub use scorer::{score, score_with};
pub use stats::FontStatistics;
pub use title::{resolve_title, resolve_title_with_source, TitleSource, MAX_METADATA_TITLE_CHARS};

use crate::model::{HeadingLevel, TextSpan};

/// Confidence below which a span is never classified.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// A span accepted as a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,
    /// Cleaned heading text
    pub text: String,
    /// Confidence the span scored
    pub confidence: f64,
}

/// Per-document heading classifier.
///
/// Create one per document; the statistics it accumulates must never be
/// shared with another document.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    stats: FontStatistics,
    min_confidence: f64,
    /// Record each scored span into the statistics (streaming mode)
    record: bool,
}

impl HeadingClassifier {
    /// Streaming classifier with empty statistics.
    pub fn new() -> Self {
        Self {
            stats: FontStatistics::new(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            record: true,
        }
    }

    /// Classifier scoring against precomputed statistics, which stay frozen.
    pub fn with_statistics(stats: FontStatistics) -> Self {
        Self {
            stats,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            record: false,
        }
    }

    /// Set the confidence gate.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Statistics gathered so far.
    pub fn statistics(&self) -> &FontStatistics {
        &self.stats
    }

    /// Run one span through the pipeline.
    pub fn analyze(&mut self, span: &TextSpan) -> Option<Heading> {
        let text = span.text.trim();
        if text.is_empty() || !is_candidate(text) {
            log::trace!("not a heading candidate: {:?}", text);
            return None;
        }

        let confidence = if self.record {
            score(span, &mut self.stats)
        } else {
            score_with(span, &self.stats)
        };
        if confidence < self.min_confidence {
            log::trace!("confidence {:.2} too low: {:?}", confidence, text);
            return None;
        }

        let level = classify_level(text, span.effective_font_size(), confidence, &self.stats)?;
        Some(Heading {
            level,
            text: clean_heading_text(text),
            confidence,
        })
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleFlags;

    fn body(text: &str) -> TextSpan {
        TextSpan::new(text, 10.0).at_y(400.0).with_page_height(800.0)
    }

    #[test]
    fn test_rejected_spans_not_recorded() {
        let mut classifier = HeadingClassifier::new();
        assert!(classifier.analyze(&body("   ")).is_none());
        assert!(classifier.analyze(&body("lowercase body text")).is_none());
        assert!(classifier.statistics().is_empty());

        classifier.analyze(&body("Body Sentence here"));
        assert_eq!(classifier.statistics().len(), 1);
    }

    #[test]
    fn test_numbered_heading() {
        let mut classifier = HeadingClassifier::new();
        for _ in 0..4 {
            classifier.analyze(&TextSpan::new("Regular paragraph text", 12.0).at_y(400.0));
        }
        let heading = classifier
            .analyze(&TextSpan::new("1. Introduction", 12.0).at_y(400.0).with_page_height(800.0))
            .unwrap();
        assert_eq!(heading.level, HeadingLevel::H1);
        assert_eq!(heading.text, "1. Introduction");
    }

    #[test]
    fn test_low_confidence_dropped() {
        let mut classifier = HeadingClassifier::new();
        assert!(classifier.analyze(&body("Plain words")).is_none());
        assert_eq!(classifier.statistics().len(), 1);
    }

    #[test]
    fn test_min_confidence_gate() {
        let span = TextSpan::new("Overview of Work", 10.0)
            .with_flags(StyleFlags::empty().with(StyleFlags::BOLD))
            .with_font("Helvetica-Bold")
            .at_y(400.0)
            .with_page_height(800.0);

        // bold 0.2 + font name 0.15 + keyword 0.1 + length 0.1
        let mut lenient = HeadingClassifier::new();
        assert!(lenient.analyze(&span).is_some());

        let mut strict = HeadingClassifier::new().with_min_confidence(0.9);
        assert!(strict.analyze(&span).is_none());
    }

    #[test]
    fn test_frozen_statistics_not_updated() {
        let mut stats = FontStatistics::new();
        stats.record(10.0);
        let mut classifier = HeadingClassifier::with_statistics(stats);
        classifier.analyze(&body("Some Heading Text"));
        assert_eq!(classifier.statistics().len(), 1);
    }
}
