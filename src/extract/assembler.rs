//! Outline assembly: drives every span of every eligible page through the
//! heading classifier and collects the accepted headings in order.

use super::options::{ErrorMode, ExtractOptions, StatisticsMode};
use crate::classify::{
    is_candidate, resolve_title_with_source, FontStatistics, HeadingClassifier,
};
use crate::error::Result;
use crate::model::{DocumentOutline, OutlineEntry, SpanPage};
use crate::parser::SpanSource;

/// Extracts the title and heading outline of a document.
///
/// Stateless between documents: every call to [`OutlineExtractor::extract`]
/// builds fresh font statistics, so one extractor may serve many documents,
/// also from several threads.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: ExtractOptions,
}

impl OutlineExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract the title and outline of one document.
    pub fn extract<S: SpanSource + ?Sized>(&self, source: &S) -> Result<DocumentOutline> {
        let page_count = source.page_count();
        let eligible = page_count.min(self.options.max_pages);
        if page_count > self.options.max_pages {
            log::warn!(
                "document has {} pages, processing first {} only",
                page_count,
                self.options.max_pages
            );
        }

        let mut first_page = if page_count > 0 {
            self.read_page(source, 0)?
        } else {
            None
        };

        let metadata_title = source.metadata_title();
        let (title, title_source) = match &first_page {
            Some(page) => {
                resolve_title_with_source(metadata_title.as_deref(), &page.spans, page.height)
            }
            None => resolve_title_with_source(metadata_title.as_deref(), &[], 0.0),
        };
        log::debug!("title {:?} from {:?}", title, title_source);

        let mut outline = DocumentOutline::new(title);

        match self.options.statistics {
            StatisticsMode::Streaming => {
                let mut classifier =
                    HeadingClassifier::new().with_min_confidence(self.options.min_confidence);
                for index in 0..eligible {
                    let page = match index {
                        0 => first_page.take(),
                        _ => self.read_page(source, index)?,
                    };
                    if let Some(page) = page {
                        collect_page(&mut classifier, page, index, &mut outline);
                    }
                }
            }
            StatisticsMode::TwoPass => {
                let mut pages = Vec::with_capacity(eligible);
                for index in 0..eligible {
                    let page = match index {
                        0 => first_page.take(),
                        _ => self.read_page(source, index)?,
                    };
                    if let Some(page) = page {
                        pages.push((index, page));
                    }
                }

                let stats = document_statistics(pages.iter().map(|(_, page)| page));
                let mut classifier = HeadingClassifier::with_statistics(stats)
                    .with_min_confidence(self.options.min_confidence);
                for (index, page) in pages {
                    collect_page(&mut classifier, page, index, &mut outline);
                }
            }
        }

        Ok(outline)
    }

    /// Read one page, skipping it in lenient mode when it cannot be read.
    fn read_page<S: SpanSource + ?Sized>(
        &self,
        source: &S,
        index: usize,
    ) -> Result<Option<SpanPage>> {
        match source.page(index) {
            Ok(page) => Ok(Some(page)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to read page {}: {}", index + 1, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Font statistics over every heading candidate of the given pages.
fn document_statistics<'a>(pages: impl Iterator<Item = &'a SpanPage>) -> FontStatistics {
    let mut stats = FontStatistics::new();
    for span in pages.flat_map(|page| page.spans.iter()) {
        let text = span.text.trim();
        if !text.is_empty() && is_candidate(text) {
            stats.record(span.effective_font_size());
        }
    }
    stats
}

/// Classify the spans of one page and append accepted headings.
fn collect_page(
    classifier: &mut HeadingClassifier,
    page: SpanPage,
    index: usize,
    outline: &mut DocumentOutline,
) {
    let page_number = index as u32 + 1;
    for mut span in page.spans {
        span.page_number = page_number;
        if let Some(heading) = classifier.analyze(&span) {
            log::debug!(
                "{} {:?} on page {} (confidence {:.2})",
                heading.level,
                heading.text,
                page_number,
                heading.confidence
            );
            outline.push(OutlineEntry::new(heading.level, heading.text, page_number));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{HeadingLevel, TextSpan, UNTITLED};
    use crate::parser::SpanDocument;
    use std::cell::RefCell;

    fn body(text: &str) -> TextSpan {
        TextSpan::new(text, 12.0).at_y(400.0)
    }

    fn page(spans: Vec<TextSpan>) -> SpanPage {
        let mut page = SpanPage::new(800.0);
        for span in spans {
            page.add_span(span);
        }
        page
    }

    /// Source that records which pages were requested and fails on some.
    struct TracingSource {
        pages: usize,
        failing: Vec<usize>,
        requested: RefCell<Vec<usize>>,
    }

    impl SpanSource for TracingSource {
        fn page_count(&self) -> usize {
            self.pages
        }

        fn metadata_title(&self) -> Option<String> {
            None
        }

        fn page(&self, index: usize) -> Result<SpanPage> {
            self.requested.borrow_mut().push(index);
            if self.failing.contains(&index) {
                return Err(Error::PdfParse(format!("page {} is damaged", index)));
            }
            Ok(page(vec![body("Chapter 1 Opening")]))
        }
    }

    #[test]
    fn test_empty_document() {
        let outline = OutlineExtractor::default()
            .extract(&SpanDocument::new())
            .unwrap();
        assert_eq!(outline.title, UNTITLED);
        assert!(outline.outline.is_empty());
        assert!(outline.error.is_none());
    }

    #[test]
    fn test_entries_in_encounter_order_with_page_numbers() {
        let doc = SpanDocument::new()
            .with_page(page(vec![body("2. Second"), body("Body text that goes on")]))
            .with_page(page(vec![body("1. First"), body("1.1 Detail")]));

        let outline = OutlineExtractor::default().extract(&doc).unwrap();
        let entries: Vec<_> = outline
            .outline
            .iter()
            .map(|e| (e.level, e.text.as_str(), e.page))
            .collect();
        assert_eq!(
            entries,
            vec![
                (HeadingLevel::H1, "2. Second", 1),
                (HeadingLevel::H1, "1. First", 2),
                (HeadingLevel::H2, "1.1 Detail", 2),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let doc = SpanDocument::new().with_page(page(vec![
            body("Chapter 2 Repeat"),
            body("Chapter 2 Repeat"),
        ]));
        let outline = OutlineExtractor::default().extract(&doc).unwrap();
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_page_cap_limits_reads() {
        let source = TracingSource {
            pages: 60,
            failing: vec![],
            requested: RefCell::new(Vec::new()),
        };
        let outline = OutlineExtractor::default().extract(&source).unwrap();

        assert_eq!(outline.len(), 50);
        assert_eq!(outline.outline.last().unwrap().page, 50);
        let requested = source.requested.borrow();
        assert_eq!(requested.len(), 50);
        assert!(requested.iter().all(|&i| i < 50));
    }

    #[test]
    fn test_custom_page_cap() {
        let source = TracingSource {
            pages: 5,
            failing: vec![],
            requested: RefCell::new(Vec::new()),
        };
        let options = ExtractOptions::new().with_max_pages(2);
        let outline = OutlineExtractor::new(options).extract(&source).unwrap();
        assert_eq!(outline.len(), 2);
    }

    #[test]
    fn test_strict_mode_propagates_page_errors() {
        let source = TracingSource {
            pages: 3,
            failing: vec![1],
            requested: RefCell::new(Vec::new()),
        };
        let result = OutlineExtractor::default().extract(&source);
        assert!(matches!(result, Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_lenient_mode_skips_bad_pages() {
        let source = TracingSource {
            pages: 3,
            failing: vec![0, 1],
            requested: RefCell::new(Vec::new()),
        };
        let options = ExtractOptions::new().lenient();
        let outline = OutlineExtractor::new(options).extract(&source).unwrap();

        assert_eq!(outline.title, UNTITLED);
        assert_eq!(outline.len(), 1);
        assert_eq!(outline.outline[0].page, 3);
        // The first page is read once for both title and outline
        assert_eq!(*source.requested.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_document_statistics_skip_non_candidates() {
        let pages = [page(vec![
            TextSpan::new("lowercase start", 30.0),
            TextSpan::new("  ", 30.0),
            TextSpan::new("Kept Span", 10.0),
        ])];
        let stats = document_statistics(pages.iter());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.average(), 10.0);
    }
}
