//! JSON export of linked structures and chunk lists.

use crate::error::{Error, Result};
use crate::model::{Chunk, DocumentStructure};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a linked document structure to JSON.
pub fn to_json(doc: &DocumentStructure, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a chunk list to JSON.
pub fn chunks_to_json(chunks: &[Chunk], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(chunks),
        JsonFormat::Compact => serde_json::to_string(chunks),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageStructure;

    #[test]
    fn test_to_json_pretty() {
        let mut doc = DocumentStructure::new("abc123");
        doc.pages.push(PageStructure::empty(1, 612.0, 792.0));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"document_id\""));
        assert!(json.contains("abc123"));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = DocumentStructure::new("abc123");
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_chunks_round_trip() {
        let chunks = vec![Chunk {
            chunk_id: "deadbeef".to_string(),
            page: 1,
            text: "[PAGE: 1]".to_string(),
            citations: vec![],
            contains_table: false,
            contains_figure: true,
            chunk_type: crate::model::ChunkKind::FigureOnly,
        }];

        let json = chunks_to_json(&chunks, JsonFormat::Compact).unwrap();
        let back: Vec<Chunk> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].chunk_id, "deadbeef");
    }
}
