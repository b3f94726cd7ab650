//! Document title resolution.

use std::cmp::Ordering;

use super::patterns::collapse_whitespace;
use crate::model::{TextSpan, UNTITLED};

/// Metadata titles must be shorter than this many characters.
pub const MAX_METADATA_TITLE_CHARS: usize = 200;

/// Where a resolved title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    /// The document information dictionary
    Metadata,
    /// The largest text in the top third of the first page
    FirstPage,
    /// Nothing qualified
    Fallback,
}

/// A first-page span considered for the title.
#[derive(Debug, Clone, PartialEq)]
struct TitleCandidate<'a> {
    text: &'a str,
    font_size: f64,
    y: f64,
}

/// Resolve the document title.
pub fn resolve_title(
    metadata_title: Option<&str>,
    first_page_spans: &[TextSpan],
    first_page_height: f64,
) -> String {
    resolve_title_with_source(metadata_title, first_page_spans, first_page_height).0
}

/// Resolve the document title and report which rule produced it.
///
/// A usable metadata title wins. Otherwise the largest span in the top third
/// of the first page is taken, the higher one on ties.
pub fn resolve_title_with_source(
    metadata_title: Option<&str>,
    first_page_spans: &[TextSpan],
    first_page_height: f64,
) -> (String, TitleSource) {
    if let Some(title) = metadata_title.map(str::trim) {
        if !title.is_empty() && title.chars().count() < MAX_METADATA_TITLE_CHARS {
            return (title.to_string(), TitleSource::Metadata);
        }
    }

    let top_third = first_page_height / 3.0;
    let mut candidates: Vec<TitleCandidate<'_>> = first_page_spans
        .iter()
        .filter(|span| span.bbox.y0 < top_third)
        .map(|span| TitleCandidate {
            text: span.text.trim(),
            font_size: span.font_size,
            y: span.bbox.y0,
        })
        .filter(|c| c.text.chars().count() > 5 && c.font_size > 12.0)
        .collect();

    candidates.sort_by(|a, b| {
        b.font_size
            .partial_cmp(&a.font_size)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    });

    match candidates.first() {
        Some(best) => (collapse_whitespace(best.text), TitleSource::FirstPage),
        None => (UNTITLED.to_string(), TitleSource::Fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f64, y: f64) -> TextSpan {
        TextSpan::new(text, size).at_y(y).with_page_height(800.0)
    }

    #[test]
    fn test_metadata_title_wins() {
        let spans = vec![span("BUDGET OVERVIEW", 24.0, 40.0)];
        assert_eq!(
            resolve_title_with_source(Some("  Annual Report 2024 "), &spans, 800.0),
            ("Annual Report 2024".to_string(), TitleSource::Metadata)
        );
    }

    #[test]
    fn test_metadata_title_length_limit() {
        let spans = vec![span("BUDGET OVERVIEW", 24.0, 40.0)];
        let long = "T".repeat(200);
        assert_eq!(resolve_title(Some(&long), &spans, 800.0), "BUDGET OVERVIEW");

        let just_fits = "T".repeat(199);
        assert_eq!(resolve_title(Some(&just_fits), &spans, 800.0), just_fits);
    }

    #[test]
    fn test_blank_metadata_ignored() {
        let spans = vec![span("BUDGET OVERVIEW", 24.0, 40.0)];
        assert_eq!(resolve_title(Some("   "), &spans, 800.0), "BUDGET OVERVIEW");
    }

    #[test]
    fn test_largest_top_span() {
        let spans = vec![
            span("BUDGET OVERVIEW", 24.0, 40.0),
            span("Q3 results", 11.0, 300.0),
        ];
        assert_eq!(resolve_title(None, &spans, 800.0), "BUDGET OVERVIEW");
    }

    #[test]
    fn test_ties_prefer_higher_span() {
        let spans = vec![
            span("Second Line", 20.0, 120.0),
            span("First Line", 20.0, 60.0),
        ];
        assert_eq!(resolve_title(None, &spans, 800.0), "First Line");
    }

    #[test]
    fn test_candidate_filters() {
        let spans = vec![
            // below the top third
            span("Lower Heading", 30.0, 300.0),
            // too short
            span("Short", 30.0, 20.0),
            // not larger than 12pt
            span("Body sized line", 12.0, 20.0),
        ];
        let (title, source) = resolve_title_with_source(None, &spans, 800.0);
        assert_eq!(title, UNTITLED);
        assert_eq!(source, TitleSource::Fallback);
    }

    #[test]
    fn test_title_whitespace_collapsed() {
        let spans = vec![span("  Annual \n  Plan  ", 18.0, 30.0)];
        assert_eq!(resolve_title(None, &spans, 800.0), "Annual Plan");
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(resolve_title(None, &[], 0.0), UNTITLED);
    }
}
