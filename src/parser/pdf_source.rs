//! PDF span source using lopdf.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::backend::{LopdfBackend, PageId, PdfBackend};
use super::layout::extract_page;
use super::source::SpanSource;
use crate::error::{Error, Result};
use crate::model::SpanPage;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Span source reading a PDF document.
pub struct PdfSource {
    backend: LopdfBackend,
    pages: BTreeMap<u32, PageId>,
}

impl PdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut header = [0u8; 16];
        let mut reader = BufReader::new(File::open(path)?);
        let read = reader.read(&mut header)?;
        check_header(&header[..read])?;

        Self::with_backend(LopdfBackend::load_file(path)?)
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        check_header(data)?;
        Self::with_backend(LopdfBackend::load_bytes(data)?)
    }

    /// Read a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn with_backend(backend: LopdfBackend) -> Result<Self> {
        let pages = backend.pages();
        Ok(Self { backend, pages })
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

impl SpanSource for PdfSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn metadata_title(&self) -> Option<String> {
        self.backend.metadata_title()
    }

    fn page(&self, index: usize) -> Result<SpanPage> {
        let page_id = self
            .pages
            .values()
            .nth(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, self.pages.len() as u32))?;
        extract_page(&self.backend, *page_id)
    }
}

/// Check whether bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Validate the `%PDF-x.y` header.
fn check_header(data: &[u8]) -> Result<()> {
    if !is_pdf_bytes(data) || data.len() < PDF_MAGIC.len() + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    let version = &data[PDF_MAGIC.len()..PDF_MAGIC.len() + VERSION_LEN];
    match version {
        [major @ (b'1' | b'2'), b'.', minor] if minor.is_ascii_digit() => {
            if *major == b'2' && *minor != b'0' {
                return Err(Error::UnsupportedVersion(
                    String::from_utf8_lossy(version).to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).to_string(),
        )),
    }
}
