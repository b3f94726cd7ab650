//! The span source interface consumed by the outline extractor.

use crate::error::{Error, Result};
use crate::model::SpanPage;

/// A document presented as pages of text spans.
///
/// Page indices are 0-based and contiguous. Pages are requested lazily and
/// in order, so a source never has to decode pages past the page cap.
pub trait SpanSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Title from document metadata, if any.
    fn metadata_title(&self) -> Option<String>;

    /// Spans of the page at `index`, in reading order.
    fn page(&self, index: usize) -> Result<SpanPage>;
}

/// In-memory span source, for callers that bring their own parser.
#[derive(Debug, Clone, Default)]
pub struct SpanDocument {
    title: Option<String>,
    pages: Vec<SpanPage>,
}

impl SpanDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a page.
    pub fn add_page(&mut self, page: SpanPage) {
        self.pages.push(page);
    }

    /// Builder form of [`SpanDocument::add_page`].
    pub fn with_page(mut self, page: SpanPage) -> Self {
        self.add_page(page);
        self
    }

    /// Pages in order.
    pub fn pages(&self) -> &[SpanPage] {
        &self.pages
    }
}

impl SpanSource for SpanDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn metadata_title(&self) -> Option<String> {
        self.title.clone()
    }

    fn page(&self, index: usize) -> Result<SpanPage> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.pages.len() as u32))
    }
}
