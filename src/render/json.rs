//! JSON rendering for document outlines.

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse an outline back from JSON.
pub fn from_json(json: &str) -> Result<DocumentOutline> {
    serde_json::from_str(json).map_err(|e| Error::Render(format!("JSON parse error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn sample() -> DocumentOutline {
        let mut outline = DocumentOutline::new("Annual Report");
        outline.push(OutlineEntry::new(HeadingLevel::H1, "1. Introduction", 1));
        outline.push(OutlineEntry::new(HeadingLevel::H2, "1.1 Scope", 2));
        outline
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Annual Report\""));
        assert!(json.contains("\"level\": \"H1\""));
        assert!(json.contains('\n')); // Pretty has newlines
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
        assert!(json.contains(r#"{"level":"H2","text":"1.1 Scope","page":2}"#));
    }

    #[test]
    fn test_error_result_json() {
        let json = to_json(&DocumentOutline::failed("broken xref"), JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Error extracting title","outline":[],"error":"broken xref"}"#
        );
    }

    #[test]
    fn test_non_ascii_verbatim() {
        let outline = DocumentOutline::new("Überblick 概要");
        let json = to_json(&outline, JsonFormat::Compact).unwrap();
        assert!(json.contains("Überblick 概要"));
    }

    #[test]
    fn test_from_json() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert_eq!(from_json(&json).unwrap(), sample());
        assert!(matches!(from_json("{"), Err(Error::Render(_))));
    }
}
