//! Text span types produced by span sources.

use serde::{Deserialize, Serialize};

/// Font size assumed when a span carries no usable size.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Axis-aligned bounding box in top-down page coordinates.
///
/// `y0` is the distance from the top of the page to the top of the text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Font style bit field.
///
/// Bit layout: 0 superscript, 1 italic, 2 serif, 3 monospaced, 4 bold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    pub const SUPERSCRIPT: u32 = 1;
    pub const ITALIC: u32 = 1 << 1;
    pub const SERIF: u32 = 1 << 2;
    pub const MONOSPACE: u32 = 1 << 3;
    pub const BOLD: u32 = 1 << 4;

    /// No style bits set.
    pub fn empty() -> Self {
        Self(0)
    }

    /// Return a copy with the given bits set.
    pub fn with(self, bits: u32) -> Self {
        Self(self.0 | bits)
    }

    /// Check whether all of the given bits are set.
    pub fn contains(&self, bits: u32) -> bool {
        self.0 & bits == bits
    }

    /// Check the bold bit.
    pub fn is_bold(&self) -> bool {
        self.contains(Self::BOLD)
    }

    /// Check the italic bit.
    pub fn is_italic(&self) -> bool {
        self.contains(Self::ITALIC)
    }
}

/// A run of text carrying a single font size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Font size in points
    pub font_size: f64,
    /// Font family name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Style bits
    pub flags: StyleFlags,
    /// Position on the page
    pub bbox: BoundingBox,
    /// Height of the page the span sits on
    pub page_height: f64,
    /// 1-based page number, assigned by the outline extractor
    pub page_number: u32,
}

impl TextSpan {
    /// Create a new span with default style, position and page.
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: String::new(),
            flags: StyleFlags::empty(),
            bbox: BoundingBox::default(),
            page_height: 0.0,
            page_number: 0,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the vertical start, keeping the rest of the box.
    pub fn at_y(mut self, y0: f64) -> Self {
        self.bbox.y0 = y0;
        self
    }

    /// Set the page height.
    pub fn with_page_height(mut self, page_height: f64) -> Self {
        self.page_height = page_height;
        self
    }

    /// Font size with the 12pt default for missing or zero sizes.
    pub fn effective_font_size(&self) -> f64 {
        if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size
        } else {
            DEFAULT_FONT_SIZE
        }
    }

    /// Vertical start relative to the page height, 0 when the height is unknown.
    pub fn relative_y(&self) -> f64 {
        if self.page_height > 0.0 {
            self.bbox.y0 / self.page_height
        } else {
            0.0
        }
    }
}

/// The spans of one page, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanPage {
    /// Page height in points
    pub height: f64,
    /// Spans in reading order
    pub spans: Vec<TextSpan>,
}

impl SpanPage {
    /// Create an empty page of the given height.
    pub fn new(height: f64) -> Self {
        Self {
            height,
            spans: Vec::new(),
        }
    }

    /// Add a span, stamping it with this page's height.
    pub fn add_span(&mut self, mut span: TextSpan) {
        span.page_height = self.height;
        self.spans.push(span);
    }

    /// Builder form of [`SpanPage::add_span`].
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.add_span(span);
        self
    }

    /// Check if the page has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_font_size_defaults() {
        assert_eq!(TextSpan::new("a", 0.0).effective_font_size(), 12.0);
        assert_eq!(TextSpan::new("a", -3.0).effective_font_size(), 12.0);
        assert_eq!(TextSpan::new("a", f64::NAN).effective_font_size(), 12.0);
        assert_eq!(TextSpan::new("a", 18.0).effective_font_size(), 18.0);
    }

    #[test]
    fn test_relative_y() {
        let span = TextSpan::new("a", 12.0).at_y(40.0).with_page_height(800.0);
        assert!((span.relative_y() - 0.05).abs() < 1e-9);

        let span = TextSpan::new("a", 12.0).at_y(40.0);
        assert_eq!(span.relative_y(), 0.0);
    }

    #[test]
    fn test_style_flags() {
        let flags = StyleFlags::empty().with(StyleFlags::BOLD);
        assert!(flags.is_bold());
        assert!(!flags.is_italic());
        assert_eq!(flags.0, 16);
    }

    #[test]
    fn test_page_stamps_height() {
        let page = SpanPage::new(792.0).with_span(TextSpan::new("Title", 20.0));
        assert_eq!(page.spans[0].page_height, 792.0);
        assert!(!page.is_empty());
    }
}
