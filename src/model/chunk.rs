//! Retrieval chunk types.

use serde::{Deserialize, Serialize};

/// How a chunk was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// A paragraph block with its cited tables/figures
    Paragraph,
    /// A table no paragraph claimed
    TableOnly,
    /// An image no paragraph claimed
    FigureOnly,
    /// Whole-page text safety net, emitted regardless of linking
    FullTextFallback,
}

impl ChunkKind {
    /// Upper-case tag used inside rendered chunk text.
    pub fn tag(&self) -> &'static str {
        match self {
            ChunkKind::Paragraph => "PARAGRAPH",
            ChunkKind::TableOnly => "TABLE_ONLY",
            ChunkKind::FigureOnly => "FIGURE_ONLY",
            ChunkKind::FullTextFallback => "FULL_TEXT_FALLBACK",
        }
    }
}

/// A self-contained unit of extracted text plus citation metadata,
/// sized for downstream retrieval. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Content hash of `text`; also the deduplication key
    pub chunk_id: String,

    /// Page the chunk came from (1-indexed)
    pub page: u32,

    /// Rendered chunk text
    pub text: String,

    /// Captions (or positional fallbacks) of cited objects
    pub citations: Vec<String>,

    /// Whether any cited object is a table
    pub contains_table: bool,

    /// Whether any cited object is a figure
    pub contains_figure: bool,

    /// Assembly kind
    pub chunk_type: ChunkKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(ChunkKind::Paragraph.tag(), "PARAGRAPH");
        assert_eq!(ChunkKind::FullTextFallback.tag(), "FULL_TEXT_FALLBACK");
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&ChunkKind::TableOnly).unwrap();
        assert_eq!(json, "\"table_only\"");
        let back: ChunkKind = serde_json::from_str("\"figure_only\"").unwrap();
        assert_eq!(back, ChunkKind::FigureOnly);
    }
}
