//! Outline extraction over whole documents.

mod assembler;
mod batch;
mod options;

pub use assembler::OutlineExtractor;
pub use batch::{extract_batch, extract_batch_with_progress, find_pdf_files, BatchItem};
pub use options::{ErrorMode, ExtractOptions, StatisticsMode, DEFAULT_MAX_PAGES};
