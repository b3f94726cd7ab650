//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the PDF operations span extraction
//! needs, isolating lopdf from the content stream walker.

use std::collections::{BTreeMap, HashSet};

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter height, used when a page declares no MediaBox.
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// FontDescriptor flag: fixed-pitch glyphs.
const FD_FIXED_PITCH: i64 = 1;
/// FontDescriptor flag: serif glyphs.
const FD_SERIF: i64 = 1 << 1;
/// FontDescriptor flag: italic glyphs.
const FD_ITALIC: i64 = 1 << 6;
/// FontDescriptor flag: bold glyphs at small sizes.
const FD_FORCE_BOLD: i64 = 1 << 18;

/// Font information returned by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// Declared fixed pitch.
    pub fixed_pitch: bool,
    /// Declared serif.
    pub serif: bool,
    /// Declared italic.
    pub italic: bool,
    /// Declared force-bold.
    pub force_bold: bool,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), page numbers 1-based.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Title from the document information dictionary.
    fn metadata_title(&self) -> Option<String>;

    /// Page height in points.
    fn page_height(&self, page: PageId) -> f64;

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Resolve an object that may be an indirect reference.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    /// Walk up the page tree to find the MediaBox array.
    ///
    /// Each node is visited at most once, so a cyclic `Parent` chain ends
    /// with `None`.
    fn find_media_box(&self, page: PageId) -> Option<Vec<f64>> {
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut current = page;
        while seen.insert(current) {
            let dict = self.doc.get_dictionary(current).ok()?;
            let media_box = dict.get(b"MediaBox").ok().and_then(|o| self.resolve(o));
            if let Some(Object::Array(arr)) = media_box {
                let nums: Vec<f64> = arr
                    .iter()
                    .filter_map(|o| self.resolve(o).and_then(get_number))
                    .map(f64::from)
                    .collect();
                if nums.len() >= 4 {
                    return Some(nums);
                }
            }
            current = dict.get(b"Parent").ok()?.as_reference().ok()?;
        }
        None
    }

    fn font_info(&self, name: &[u8], font_dict: &Dictionary) -> BackendFontInfo {
        let base_font = font_dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());

        let descriptor_flags = font_dict
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve(o))
            .and_then(|o| o.as_dict().ok())
            .and_then(|d| d.get(b"Flags").ok())
            .and_then(|o| o.as_i64().ok())
            .unwrap_or(0);

        BackendFontInfo {
            name: name.to_vec(),
            base_font,
            fixed_pitch: descriptor_flags & FD_FIXED_PITCH != 0,
            serif: descriptor_flags & FD_SERIF != 0,
            italic: descriptor_flags & FD_ITALIC != 0,
            force_bold: descriptor_flags & FD_FORCE_BOLD != 0,
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn metadata_title(&self) -> Option<String> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        let info_dict = self.resolve(info)?.as_dict().ok()?;
        match info_dict.get(b"Title").ok()? {
            Object::String(bytes, _) => Some(decode_text_simple(bytes)),
            Object::Name(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
            _ => None,
        }
    }

    fn page_height(&self, page: PageId) -> f64 {
        self.find_media_box(page)
            .map(|b| (b[3] - b[1]).abs())
            .filter(|h| *h > 0.0)
            .unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let lopdf_fonts = self.doc.get_page_fonts(page)?;
        Ok(lopdf_fonts
            .iter()
            .map(|(name, font_dict)| self.font_info(name, font_dict))
            .collect())
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content has no spans
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(stream_bytes(s)),
                Object::Array(arr) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = lopdf_fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

impl LopdfBackend {
    /// Concatenate the content streams of a `Contents` array.
    fn concat_streams(&self, arr: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in arr {
            if let Some(Object::Stream(s)) = self.resolve(obj) {
                content.extend_from_slice(&stream_bytes(s));
                content.push(b' ');
            }
        }
        content
    }
}

/// Stream data with its filters applied; unfiltered streams are returned
/// as stored.
fn stream_bytes(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Extract a number from a `lopdf::Object`.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
