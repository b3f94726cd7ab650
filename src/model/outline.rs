//! Outline types: heading levels, entries and the per-document result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when nothing on the first page qualifies.
pub const UNTITLED: &str = "Untitled Document";

/// Title placeholder for documents that could not be read.
pub const ERROR_TITLE: &str = "Error extracting title";

/// Heading level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1-3).
    pub fn depth(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label as written in the JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One accepted heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Normalized heading text
    pub text: String,
    /// 1-based page number
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Document title
    pub title: String,
    /// Headings in encounter order
    pub outline: Vec<OutlineEntry>,
    /// Failure message when the document could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentOutline {
    /// Create an outline with the given title and no entries.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
            error: None,
        }
    }

    /// Structured result for a document that could not be processed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            outline: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: OutlineEntry) {
        self.outline.push(entry);
    }

    /// Whether this is a failure result.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Number of entries at the given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

impl Default for DocumentOutline {
    fn default() -> Self {
        Self::new(UNTITLED)
    }
}
