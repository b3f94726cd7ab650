//! Span extraction from page content streams.
//!
//! Walks the text operators of a page, tracking the text matrix, and emits
//! one [`TextSpan`] per show-text operation with font and geometry attached.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use super::backend::{get_number_from_value, BackendFontInfo, PageId, PdfBackend, PdfValue};
use crate::error::Result;
use crate::model::{BoundingBox, SpanPage, StyleFlags, TextSpan};

/// TJ adjustment (thousandths of text space) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Extract the spans of one page in content stream order.
pub fn extract_page(backend: &dyn PdfBackend, page_id: PageId) -> Result<SpanPage> {
    let height = backend.page_height(page_id);
    let fonts: HashMap<Vec<u8>, BackendFontInfo> = backend
        .page_fonts(page_id)?
        .into_iter()
        .map(|f| (f.name.clone(), f))
        .collect();

    let content = backend.page_content(page_id)?;
    let ops = backend.decode_content(&content)?;

    let mut page = SpanPage::new(height);
    let mut state = TextState::default();
    let mut in_text_block = false;

    for op in &ops {
        match op.operator.as_str() {
            "BT" => {
                in_text_block = true;
                state.matrix = TextMatrix::default();
            }
            "ET" => in_text_block = false,
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    state.font_key = name.clone();
                }
                state.font_size = op
                    .operands
                    .get(1)
                    .and_then(get_number_from_value)
                    .unwrap_or(12.0);
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = get_number_from_value(&op.operands[0]).unwrap_or(0.0);
                    let ty = get_number_from_value(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        state.leading = -ty;
                    }
                    state.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    let n = |i: usize, default: f32| {
                        get_number_from_value(&op.operands[i]).unwrap_or(default)
                    };
                    state
                        .matrix
                        .set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                }
            }
            "T*" => state.matrix.next_line(state.leading),
            "Tj" | "TJ" | "'" | "\"" if in_text_block => {
                if op.operator == "'" || op.operator == "\"" {
                    state.matrix.next_line(state.leading);
                }
                let operand = match op.operator.as_str() {
                    "\"" => op.operands.get(2),
                    _ => op.operands.first(),
                };
                let text = match operand {
                    Some(PdfValue::Str(bytes)) => {
                        backend.decode_text(page_id, &state.font_key, bytes)
                    }
                    Some(PdfValue::Array(items)) => show_array(backend, page_id, &state, items),
                    _ => continue,
                };
                if !text.trim().is_empty() {
                    let font = fonts.get(&state.font_key);
                    page.add_span(make_span(&text, &state, font, height));
                }
            }
            _ => {}
        }
    }

    Ok(page)
}

/// Decode a TJ array, turning large negative adjustments into spaces.
fn show_array(
    backend: &dyn PdfBackend,
    page_id: PageId,
    state: &TextState,
    items: &[PdfValue],
) -> String {
    let mut combined = String::new();
    for item in items {
        match item {
            PdfValue::Str(bytes) => {
                combined.push_str(&backend.decode_text(page_id, &state.font_key, bytes));
            }
            PdfValue::Integer(_) | PdfValue::Real(_) => {
                let adjustment = -get_number_from_value(item).unwrap_or(0.0);
                let needs_space = adjustment > TJ_SPACE_THRESHOLD
                    && combined
                        .chars()
                        .last()
                        .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                if needs_space {
                    combined.push(' ');
                }
            }
            _ => {}
        }
    }
    combined
}

/// Build a span in top-down page coordinates.
fn make_span(
    text: &str,
    state: &TextState,
    font: Option<&BackendFontInfo>,
    page_height: f64,
) -> TextSpan {
    let (x, baseline) = state.matrix.position();
    let size = f64::from(state.font_size * state.matrix.scale());
    let text: String = text.nfc().collect();

    let font_name = font
        .map(|f| strip_subset_prefix(&f.base_font).to_string())
        .unwrap_or_else(|| String::from_utf8_lossy(&state.font_key).to_string());

    // Ascender at ~0.8 of the size, glyphs ~0.5 of the size wide
    let top = f64::from(baseline) + size * 0.8;
    let y0 = page_height - top;
    let width = text.chars().count() as f64 * size * 0.5;
    let bbox = BoundingBox::new(f64::from(x), y0, f64::from(x) + width, y0 + size);

    TextSpan {
        flags: style_flags(&font_name, font),
        text,
        font_size: size,
        font_name,
        bbox,
        page_height,
        page_number: 0,
    }
}

/// Style bits from the font name and its descriptor.
fn style_flags(font_name: &str, font: Option<&BackendFontInfo>) -> StyleFlags {
    let lower = font_name.to_lowercase();
    let mut flags = StyleFlags::empty();

    let descriptor = font.cloned().unwrap_or_default();
    if descriptor.force_bold
        || lower.contains("bold")
        || lower.contains("black")
        || lower.contains("heavy")
    {
        flags = flags.with(StyleFlags::BOLD);
    }
    if descriptor.italic || lower.contains("italic") || lower.contains("oblique") {
        flags = flags.with(StyleFlags::ITALIC);
    }
    if descriptor.fixed_pitch || lower.contains("courier") || lower.contains("mono") {
        flags = flags.with(StyleFlags::MONOSPACE);
    }
    if descriptor.serif {
        flags = flags.with(StyleFlags::SERIF);
    }
    flags
}

/// Drop a `ABCDEF+` subset tag from an embedded font name.
fn strip_subset_prefix(name: &str) -> &str {
    match name.split_once('+') {
        Some((tag, rest)) if tag.len() == 6 && tag.chars().all(|c| c.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// Text state carried between operators.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font_key: Vec<u8>,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_key: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        let leading = if leading > 0.0 { leading } else { 12.0 };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    /// Vertical scale factor.
    fn scale(&self) -> f32 {
        let scale = (self.c * self.c + self.d * self.d).sqrt();
        if scale > 0.0 {
            scale
        } else {
            1.0
        }
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        // Extensions B-F
        || (0x20000..=0x2EBEF).contains(&code)
        // Hiragana and Katakana
        || (0x3040..=0x30FF).contains(&code)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::backend::{decode_text_simple, ContentOp};
    use std::collections::BTreeMap;

    /// Backend serving a single page from prepared operations.
    struct MockBackend {
        ops: Vec<ContentOp>,
        fonts: Vec<BackendFontInfo>,
    }

    impl PdfBackend for MockBackend {
        fn pages(&self) -> BTreeMap<u32, PageId> {
            BTreeMap::from([(1, (1, 0))])
        }

        fn metadata_title(&self) -> Option<String> {
            None
        }

        fn page_height(&self, _page: PageId) -> f64 {
            800.0
        }

        fn page_fonts(&self, _page: PageId) -> Result<Vec<BackendFontInfo>> {
            Ok(self.fonts.clone())
        }

        fn page_content(&self, _page: PageId) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn decode_content(&self, _data: &[u8]) -> Result<Vec<ContentOp>> {
            if self.ops.is_empty() {
                return Err(Error::PdfParse("no content".to_string()));
            }
            Ok(self.ops.clone())
        }

        fn decode_text(&self, _page: PageId, _font: &[u8], bytes: &[u8]) -> String {
            decode_text_simple(bytes)
        }
    }

    fn name(n: &str) -> PdfValue {
        PdfValue::Name(n.as_bytes().to_vec())
    }

    fn int(i: i64) -> PdfValue {
        PdfValue::Integer(i)
    }

    fn string(s: &str) -> PdfValue {
        PdfValue::Str(s.as_bytes().to_vec())
    }

    fn bold_font() -> BackendFontInfo {
        BackendFontInfo {
            name: b"F1".to_vec(),
            base_font: "ABCDEF+Helvetica-Bold".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_positions_and_fonts() {
        let backend = MockBackend {
            ops: vec![
                ContentOp::new("BT", vec![]),
                ContentOp::new("Tf", vec![name("F1"), int(20)]),
                ContentOp::new("Td", vec![int(72), int(700)]),
                ContentOp::new("Tj", vec![string("Project Plan")]),
                ContentOp::new("ET", vec![]),
            ],
            fonts: vec![bold_font()],
        };

        let page = extract_page(&backend, (1, 0)).unwrap();
        assert_eq!(page.height, 800.0);
        assert_eq!(page.spans.len(), 1);

        let span = &page.spans[0];
        assert_eq!(span.text, "Project Plan");
        assert_eq!(span.font_size, 20.0);
        assert_eq!(span.font_name, "Helvetica-Bold");
        assert!(span.flags.is_bold());
        // 800 - (700 + 16)
        assert!((span.bbox.y0 - 84.0).abs() < 1e-6);
        assert_eq!(span.page_height, 800.0);
    }

    #[test]
    fn test_tj_array_spacing() {
        let backend = MockBackend {
            ops: vec![
                ContentOp::new("BT", vec![]),
                ContentOp::new("Tf", vec![name("F1"), int(12)]),
                ContentOp::new(
                    "TJ",
                    vec![PdfValue::Array(vec![
                        string("Key"),
                        int(-250),
                        string("Findings"),
                        int(-30),
                        string("!"),
                    ])],
                ),
                ContentOp::new("ET", vec![]),
            ],
            fonts: vec![],
        };

        let page = extract_page(&backend, (1, 0)).unwrap();
        assert_eq!(page.spans[0].text, "Key Findings!");
        // Unknown font falls back to the resource name
        assert_eq!(page.spans[0].font_name, "F1");
    }

    #[test]
    fn test_text_matrix_scale_and_next_line() {
        let backend = MockBackend {
            ops: vec![
                ContentOp::new("BT", vec![]),
                ContentOp::new("Tf", vec![name("F1"), int(1)]),
                ContentOp::new(
                    "Tm",
                    vec![int(18), int(0), int(0), int(18), int(50), int(600)],
                ),
                ContentOp::new("Tj", vec![string("Scaled")]),
                ContentOp::new("TL", vec![int(20)]),
                ContentOp::new("T*", vec![]),
                ContentOp::new("Tj", vec![string("Next")]),
                ContentOp::new("ET", vec![]),
            ],
            fonts: vec![bold_font()],
        };

        let page = extract_page(&backend, (1, 0)).unwrap();
        assert_eq!(page.spans.len(), 2);
        assert_eq!(page.spans[0].font_size, 18.0);
        assert!(page.spans[1].bbox.y0 > page.spans[0].bbox.y0);
    }

    #[test]
    fn test_text_outside_block_and_blank_ignored() {
        let backend = MockBackend {
            ops: vec![
                ContentOp::new("Tj", vec![string("Stray")]),
                ContentOp::new("BT", vec![]),
                ContentOp::new("Tj", vec![string("   ")]),
                ContentOp::new("ET", vec![]),
            ],
            fonts: vec![],
        };

        let page = extract_page(&backend, (1, 0)).unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_decode_error_propagates() {
        let backend = MockBackend {
            ops: vec![],
            fonts: vec![],
        };
        assert!(extract_page(&backend, (1, 0)).is_err());
    }

    #[test]
    fn test_strip_subset_prefix() {
        assert_eq!(strip_subset_prefix("ABCDEF+Times-Bold"), "Times-Bold");
        assert_eq!(strip_subset_prefix("Times+Bold"), "Times+Bold");
        assert_eq!(strip_subset_prefix("Arial"), "Arial");
    }

    #[test]
    fn test_style_flags_from_descriptor() {
        let font = BackendFontInfo {
            italic: true,
            force_bold: true,
            ..Default::default()
        };
        let flags = style_flags("Plain", Some(&font));
        assert!(flags.is_bold());
        assert!(flags.is_italic());
        assert!(style_flags("Courier", None).contains(StyleFlags::MONOSPACE));
    }
}
