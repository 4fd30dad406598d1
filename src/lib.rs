//! # pdfchunk
//!
//! Caption-aware linking of PDF page content and retrieval-ready chunk
//! assembly.
//!
//! Given the raw layout output of an external PDF extractor (words with
//! positions, table regions, image regions), this library rebuilds lines
//! and paragraphs, detects table/figure captions, links captions and
//! paragraphs to nearby objects by page geometry, and packages everything
//! into deduplicated text chunks for downstream retrieval.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfchunk::{chunk_document, link_file, ChunkerOptions};
//!
//! fn main() -> pdfchunk::Result<()> {
//!     // Link captions and paragraphs to tables/figures
//!     let doc = link_file("extraction.json")?;
//!
//!     // Assemble retrieval chunks
//!     let chunks = chunk_document(&doc, &ChunkerOptions::default());
//!     println!("{} chunks", chunks.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout reconstruction**: words → lines → paragraphs by vertical
//!   position and gap thresholds
//! - **Caption detection**: `Table N` / `Fig. N` classification with roman
//!   and decimal ordinals
//! - **Geometry-based linking**: overlap-biased nearest neighbor for
//!   captions, proximity windows for paragraphs
//! - **Chunk assembly**: cited, size-bounded, content-hash deduplicated
//! - **Partial degradation**: per-page failures are recorded, never fatal
//! - **Parallel pages**: Rayon fan-out with page order restored

pub mod caption;
pub mod chunker;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod linker;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use caption::CaptionDetector;
pub use chunker::{build_chunks, build_page_chunks, ChunkerOptions, DedupContext};
pub use error::{Error, FailureKind, PageFailure, Result};
pub use geometry::BoundingBox;
pub use layout::{group_into_lines, group_into_paragraphs, Line, Word};
pub use linker::LinkerConfig;
pub use model::{
    document_id_from_bytes, Block, Caption, CaptionKind, Chunk, ChunkKind, DocumentStructure,
    ImageObject, PageStructure, Paragraph, TableObject,
};
pub use pipeline::{
    ImagePreprocessor, JsonPageSource, OcrEngine, PageSource, Pipeline, PipelineOptions,
    RasterImage, RawDocument, RawImage, RawPage, RawTable,
};
pub use render::{chunks_to_json, to_json, JsonFormat};

use std::path::Path;
use std::sync::Arc;

/// Link a raw extraction dump into a document structure.
///
/// # Example
///
/// ```no_run
/// use pdfchunk::link_file;
///
/// let doc = link_file("extraction.json").unwrap();
/// println!("pages: {}", doc.page_count());
/// ```
pub fn link_file<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    link_file_with_options(path, PipelineOptions::default())
}

/// Link a raw extraction dump with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfchunk::{link_file_with_options, PipelineOptions};
///
/// let options = PipelineOptions::new().sequential();
/// let doc = link_file_with_options("extraction.json", options).unwrap();
/// ```
pub fn link_file_with_options<P: AsRef<Path>>(
    path: P,
    options: PipelineOptions,
) -> Result<DocumentStructure> {
    let source = JsonPageSource::open(path)?;
    let document_id = source.document_id().to_string();
    Pipeline::new(options).process(&document_id, Arc::new(source))
}

/// Link a raw extraction dump and assemble retrieval chunks.
pub fn chunk_file<P: AsRef<Path>>(path: P) -> Result<Vec<Chunk>> {
    chunk_file_with_options(path, PipelineOptions::default(), ChunkerOptions::default())
}

/// Link and chunk with custom options for both phases.
pub fn chunk_file_with_options<P: AsRef<Path>>(
    path: P,
    pipeline: PipelineOptions,
    chunker: ChunkerOptions,
) -> Result<Vec<Chunk>> {
    let doc = link_file_with_options(path, pipeline)?;
    Ok(build_chunks(&doc, &chunker))
}

/// Assemble retrieval chunks from an already-linked document.
pub fn chunk_document(doc: &DocumentStructure, options: &ChunkerOptions) -> Vec<Chunk> {
    build_chunks(doc, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_file_missing_document_is_fatal() {
        let result = link_file("/nonexistent/extraction.json");
        assert!(matches!(result, Err(Error::DocumentNotFound(_))));
    }

    #[test]
    fn test_chunk_document_empty() {
        let doc = DocumentStructure::new("doc");
        let chunks = chunk_document(&doc, &ChunkerOptions::default());
        assert!(chunks.is_empty());
    }
}
