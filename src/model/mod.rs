//! Document model types.
//!
//! Spans flow in from a span source, outlines flow out to the renderer.
//! Both sides are plain data with serde support.

mod outline;
mod span;

pub use outline::{DocumentOutline, HeadingLevel, OutlineEntry, ERROR_TITLE, UNTITLED};
pub use span::{BoundingBox, SpanPage, StyleFlags, TextSpan, DEFAULT_FONT_SIZE};
