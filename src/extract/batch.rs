//! Batch extraction over many documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::assembler::OutlineExtractor;
use super::options::ExtractOptions;
use crate::error::Result;
use crate::model::DocumentOutline;
use crate::parser::PdfSource;

/// Result of extracting one document of a batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Input path
    pub path: PathBuf,
    /// Extracted outline, or the structured error result
    pub outline: DocumentOutline,
    /// Wall time spent on this document
    pub elapsed: Duration,
}

impl BatchItem {
    /// Whether the document was extracted without error.
    pub fn is_ok(&self) -> bool {
        !self.outline.is_error()
    }
}

/// Extract the outline of every file, in input order.
///
/// A failing document never aborts the batch; it yields a
/// [`DocumentOutline::failed`] result instead.
pub fn extract_batch<P>(paths: &[P], options: &ExtractOptions) -> Vec<BatchItem>
where
    P: AsRef<Path> + Sync,
{
    extract_batch_with_progress(paths, options, |_| {})
}

/// Like [`extract_batch`], calling `on_done` as each document finishes.
///
/// With parallel extraction `on_done` runs on worker threads in completion
/// order; the returned items are still in input order.
pub fn extract_batch_with_progress<P, F>(
    paths: &[P],
    options: &ExtractOptions,
    on_done: F,
) -> Vec<BatchItem>
where
    P: AsRef<Path> + Sync,
    F: Fn(&BatchItem) + Sync,
{
    let extractor = OutlineExtractor::new(options.clone());
    let run = |path: &P| {
        let item = extract_one(&extractor, path.as_ref());
        on_done(&item);
        item
    };
    if options.parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    }
}

fn extract_one(extractor: &OutlineExtractor, path: &Path) -> BatchItem {
    let start = Instant::now();
    let outline = match PdfSource::open(path).and_then(|source| extractor.extract(&source)) {
        Ok(outline) => outline,
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            DocumentOutline::failed(e.to_string())
        }
    };
    BatchItem {
        path: path.to_path_buf(),
        outline,
        elapsed: start.elapsed(),
    }
}

/// PDF files directly inside `dir`, sorted by path.
///
/// The extension check is case-insensitive; subdirectories are not entered.
pub fn find_pdf_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
