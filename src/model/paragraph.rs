//! Paragraph type.

use serde::{Deserialize, Serialize};

/// A run of lines merged by vertical proximity.
///
/// Paragraphs partition a page's lines: every line belongs to exactly one
/// paragraph and their order mirrors the line order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Space-joined text of the member lines
    pub text: String,

    /// Top edge of the paragraph extent
    pub top: f32,

    /// Bottom edge of the paragraph extent
    pub bottom: f32,
}

impl Paragraph {
    /// Create a paragraph.
    pub fn new(text: impl Into<String>, top: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            top,
            bottom,
        }
    }

    /// Check if the paragraph carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Vertical extent of the paragraph.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_basics() {
        let p = Paragraph::new("some body text", 100.0, 130.0);
        assert!(!p.is_empty());
        assert_eq!(p.height(), 30.0);

        let blank = Paragraph::new("   ", 0.0, 0.0);
        assert!(blank.is_empty());
    }
}
