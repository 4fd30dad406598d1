//! Chunk assembly.
//!
//! Converts linked page structures into deduplicated, size-bounded text
//! chunks with citation metadata. Consumes nothing but the persisted
//! [`DocumentStructure`] contract.

use std::collections::HashSet;

use md5::{Digest, Md5};

use crate::model::{Chunk, ChunkKind, DocumentStructure, ImageObject, PageStructure, TableObject};
use crate::render::{clean_text, render_chunk_text, split_long_text};

/// Default chunk size bound, in characters.
pub const DEFAULT_MAX_CHARS: usize = 1600;

/// Options for chunk assembly.
#[derive(Debug, Clone)]
pub struct ChunkerOptions {
    /// Maximum characters per chunk; longer paragraph and fallback chunks
    /// split at fixed character boundaries
    pub max_chars: usize,
}

impl ChunkerOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size bound.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

impl Default for ChunkerOptions {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Deduplication scope for one assembly run.
///
/// Chunk identity is the content hash of the rendered text, global across
/// the whole run: two pages producing byte-identical chunk text collapse to
/// one chunk. The context is explicit state; callers that process pages in
/// parallel keep one context per worker and [`merge`](Self::merge) them in
/// page order afterwards.
#[derive(Debug, Default)]
pub struct DedupContext {
    seen: HashSet<String>,
}

impl DedupContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a chunk id. Returns `true` if it was not seen before.
    pub fn mark(&mut self, chunk_id: &str) -> bool {
        self.seen.insert(chunk_id.to_string())
    }

    /// Whether a chunk id has been emitted already.
    pub fn contains(&self, chunk_id: &str) -> bool {
        self.seen.contains(chunk_id)
    }

    /// Number of distinct chunk ids seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the context is empty.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Absorb another context's ids.
    pub fn merge(&mut self, other: DedupContext) {
        self.seen.extend(other.seen);
    }
}

/// Content hash of rendered chunk text; doubles as the chunk id.
pub fn chunk_hash(text: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Assemble chunks for one linked page.
///
/// Emits, in order: one chunk per paragraph block (split when oversized),
/// solo chunks for tables and images no block claimed, and the whole-page
/// fallback (split when oversized, skipped only when the page has no text).
pub fn build_page_chunks(
    page: &PageStructure,
    options: &ChunkerOptions,
    dedup: &mut DedupContext,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut used_tables: HashSet<usize> = HashSet::new();
    let mut used_images: HashSet<usize> = HashSet::new();

    // Paragraph chunks. Empty paragraphs claim nothing.
    for block in &page.blocks {
        if block.paragraph.is_empty() {
            continue;
        }

        used_tables.extend(block.table_refs.iter().copied());
        used_images.extend(block.image_refs.iter().copied());

        let tables: Vec<&TableObject> = block
            .table_refs
            .iter()
            .filter_map(|&i| page.tables.get(i))
            .collect();
        let images: Vec<&ImageObject> = block
            .image_refs
            .iter()
            .filter_map(|&i| page.images.get(i))
            .collect();

        let (text, citations) = render_chunk_text(
            page.page_number,
            ChunkKind::Paragraph,
            Some(&block.paragraph.text),
            &tables,
            &images,
        );

        for part in split_long_text(&text, options.max_chars) {
            push_chunk(
                &mut chunks,
                dedup,
                page.page_number,
                part,
                citations.clone(),
                !tables.is_empty(),
                !images.is_empty(),
                ChunkKind::Paragraph,
            );
        }
    }

    // Solo chunks for unclaimed tables.
    for (index, table) in page.tables.iter().enumerate() {
        if used_tables.contains(&index) {
            continue;
        }
        let (text, citations) =
            render_chunk_text(page.page_number, ChunkKind::TableOnly, None, &[table], &[]);
        push_chunk(
            &mut chunks,
            dedup,
            page.page_number,
            text,
            citations,
            true,
            false,
            ChunkKind::TableOnly,
        );
    }

    // Solo chunks for unclaimed images.
    for (index, image) in page.images.iter().enumerate() {
        if used_images.contains(&index) {
            continue;
        }
        let (text, citations) =
            render_chunk_text(page.page_number, ChunkKind::FigureOnly, None, &[], &[image]);
        push_chunk(
            &mut chunks,
            dedup,
            page.page_number,
            text,
            citations,
            false,
            true,
            ChunkKind::FigureOnly,
        );
    }

    // Whole-page fallback, independent of all linking.
    let full_text = clean_text(&page.full_text);
    if !full_text.is_empty() {
        for part in split_long_text(&full_text, options.max_chars) {
            let text = format!(
                "[PAGE: {}]\n[CHUNK TYPE: {}]\n\n{}",
                page.page_number,
                ChunkKind::FullTextFallback.tag(),
                part
            );
            push_chunk(
                &mut chunks,
                dedup,
                page.page_number,
                text,
                Vec::new(),
                false,
                false,
                ChunkKind::FullTextFallback,
            );
        }
    }

    chunks
}

/// Assemble chunks for a whole document with a fresh deduplication scope.
pub fn build_chunks(doc: &DocumentStructure, options: &ChunkerOptions) -> Vec<Chunk> {
    let mut dedup = DedupContext::new();
    let mut chunks = Vec::new();
    for page in &doc.pages {
        chunks.extend(build_page_chunks(page, options, &mut dedup));
    }
    log::info!(
        "assembled {} chunks from {} pages ({} distinct hashes)",
        chunks.len(),
        doc.pages.len(),
        dedup.len()
    );
    chunks
}

#[allow(clippy::too_many_arguments)]
fn push_chunk(
    chunks: &mut Vec<Chunk>,
    dedup: &mut DedupContext,
    page: u32,
    text: String,
    citations: Vec<String>,
    contains_table: bool,
    contains_figure: bool,
    chunk_type: ChunkKind,
) {
    let chunk_id = chunk_hash(&text);
    if !dedup.mark(&chunk_id) {
        log::debug!("dropping duplicate chunk {} on page {}", chunk_id, page);
        return;
    }
    chunks.push(Chunk {
        chunk_id,
        page,
        text,
        citations,
        contains_table,
        contains_figure,
        chunk_type,
    });
}
