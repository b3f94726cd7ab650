//! # docoutline
//!
//! Title and heading outline extraction from PDF documents.
//!
//! Every text span of the first pages of a document is scored against a set
//! of typographic and lexical heuristics; spans scoring high enough become
//! H1/H2/H3 outline entries. The title comes from the document metadata or,
//! failing that, the most prominent text at the top of the first page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docoutline::{extract_file, render, JsonFormat};
//!
//! fn main() -> docoutline::Result<()> {
//!     let outline = extract_file("document.pdf")?;
//!     println!("{}", outline.title);
//!
//!     let json = render::to_json(&outline, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Adaptive thresholds**: heading sizes are judged against the document's
//!   own average font size
//! - **Streaming or two-pass statistics**: see [`StatisticsMode`]
//! - **Pluggable input**: anything implementing [`SpanSource`], with a
//!   lopdf-backed [`PdfSource`] built in
//! - **Parallel batches**: uses Rayon across documents

pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use classify::{FontStatistics, Heading, HeadingClassifier, TitleSource};
pub use error::{Error, Result};
pub use extract::{
    extract_batch, extract_batch_with_progress, find_pdf_files, BatchItem, ErrorMode,
    ExtractOptions, OutlineExtractor, StatisticsMode,
};
pub use model::{
    BoundingBox, DocumentOutline, HeadingLevel, OutlineEntry, SpanPage, StyleFlags, TextSpan,
};
pub use parser::{PdfSource, SpanDocument, SpanSource};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_file;
///
/// let outline = extract_file("document.pdf").unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    extract_file_with_options(path, ExtractOptions::default())
}

/// Extract the outline of a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use docoutline::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .lenient()
///     .with_max_pages(10);
/// let outline = extract_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<DocumentOutline> {
    let source = PdfSource::open(path)?;
    OutlineExtractor::new(options).extract(&source)
}

/// Extract the outline of a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use docoutline::extract_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let outline = extract_bytes(&data).unwrap();
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<DocumentOutline> {
    extract_bytes_with_options(data, ExtractOptions::default())
}

/// Extract the outline of a PDF held in memory with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<DocumentOutline> {
    let source = PdfSource::from_bytes(data)?;
    OutlineExtractor::new(options).extract(&source)
}

/// Extract the outline of a PDF read from a reader.
pub fn extract_reader<R: Read>(reader: R) -> Result<DocumentOutline> {
    let source = PdfSource::from_reader(reader)?;
    OutlineExtractor::default().extract(&source)
}

/// Extract the outline of any span source.
///
/// # Example
///
/// ```
/// use docoutline::{extract_source, ExtractOptions, SpanDocument, SpanPage, TextSpan};
///
/// let page = SpanPage::new(792.0)
///     .with_span(TextSpan::new("Chapter 1 Beginnings", 12.0).at_y(300.0));
/// let doc = SpanDocument::new().with_title("Field Notes").with_page(page);
///
/// let outline = extract_source(&doc, ExtractOptions::default()).unwrap();
/// assert_eq!(outline.title, "Field Notes");
/// assert_eq!(outline.outline[0].text, "Chapter 1 Beginnings");
/// ```
pub fn extract_source<S: SpanSource + ?Sized>(
    source: &S,
    options: ExtractOptions,
) -> Result<DocumentOutline> {
    OutlineExtractor::new(options).extract(source)
}

/// Builder for extracting outlines.
///
/// # Example
///
/// ```no_run
/// use docoutline::{DocOutline, JsonFormat};
///
/// let json = DocOutline::new()
///     .lenient()
///     .with_max_pages(20)
///     .two_pass()
///     .extract("document.pdf")?
///     .to_json(JsonFormat::Compact)?;
/// # Ok::<(), docoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocOutline {
    options: ExtractOptions,
}

impl DocOutline {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.options = self.options.with_max_pages(max_pages);
        self
    }

    /// Set the confidence gate.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.options = self.options.with_min_confidence(min_confidence);
        self
    }

    /// Score against document-wide font statistics.
    pub fn two_pass(mut self) -> Self {
        self.options = self.options.two_pass();
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The options collected so far.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract from a PDF file.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<OutlineResult> {
        let outline = extract_file_with_options(path, self.options)?;
        Ok(OutlineResult { outline })
    }

    /// Extract from PDF bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<OutlineResult> {
        let outline = extract_bytes_with_options(data, self.options)?;
        Ok(OutlineResult { outline })
    }

    /// Extract from many PDF files, in input order.
    pub fn extract_batch<P: AsRef<Path> + Sync>(self, paths: &[P]) -> Vec<BatchItem> {
        extract_batch(paths, &self.options)
    }
}

/// Result of extracting one document with [`DocOutline`].
#[derive(Debug, Clone)]
pub struct OutlineResult {
    outline: DocumentOutline,
}

impl OutlineResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.outline, format)
    }

    /// Get the outline.
    pub fn outline(&self) -> &DocumentOutline {
        &self.outline
    }

    /// Take the outline.
    pub fn into_outline(self) -> DocumentOutline {
        self.outline
    }
}
