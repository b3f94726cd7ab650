//! Span sources: the input side of outline extraction.

mod backend;
mod layout;
mod pdf_source;
mod source;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
    DEFAULT_PAGE_HEIGHT,
};
pub use layout::extract_page;
pub use pdf_source::{is_pdf_bytes, PdfSource};
pub use source::{SpanDocument, SpanSource};
