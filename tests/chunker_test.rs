//! Integration tests for chunk assembly over linked documents.

use pdfchunk::{
    chunk_document, Block, BoundingBox, Chunk, ChunkKind, ChunkerOptions, DocumentStructure,
    ImageObject, PageStructure, Paragraph, TableObject,
};

fn doc_with(pages: Vec<PageStructure>) -> DocumentStructure {
    let mut doc = DocumentStructure::new("test-doc");
    doc.pages = pages;
    doc
}

fn kinds(chunks: &[Chunk]) -> Vec<ChunkKind> {
    chunks.iter().map(|c| c.chunk_type).collect()
}

#[test]
fn linked_table_is_cited_and_solo_chunk_suppressed() {
    // One paragraph at 100..120 with a table directly below at 130..200
    let mut page = PageStructure::empty(1, 612.0, 792.0);
    page.full_text = "Results are shown below.".to_string();
    page.tables.push(TableObject::new(
        1,
        BoundingBox::new(40.0, 130.0, 500.0, 200.0),
        vec![vec![Some("metric".to_string()), Some("value".to_string())]],
    ));
    let mut block = Block::new(Paragraph::new("Results are shown below.", 100.0, 120.0));
    block.table_refs = vec![0];
    page.blocks = vec![block];

    let chunks = chunk_document(&doc_with(vec![page]), &ChunkerOptions::default());

    let seen = kinds(&chunks);
    assert!(seen.contains(&ChunkKind::Paragraph));
    assert!(seen.contains(&ChunkKind::FullTextFallback));
    assert!(!seen.contains(&ChunkKind::TableOnly));

    let paragraph = chunks
        .iter()
        .find(|c| c.chunk_type == ChunkKind::Paragraph)
        .unwrap();
    assert!(paragraph.contains_table);
    assert!(!paragraph.contains_figure);
    assert_eq!(paragraph.citations, vec!["Table 1".to_string()]);
    assert!(paragraph.text.contains("metric | value"));
}

#[test]
fn textless_page_with_image_yields_only_figure_chunk() {
    let mut page = PageStructure::empty(1, 612.0, 792.0);
    page.images.push(ImageObject::new(
        1,
        BoundingBox::new(100.0, 200.0, 400.0, 500.0),
        "flowchart: start -> end",
    ));

    let chunks = chunk_document(&doc_with(vec![page]), &ChunkerOptions::default());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_type, ChunkKind::FigureOnly);
    assert!(chunks[0].contains_figure);
    assert!(!chunks[0].contains_table);
    assert!(chunks[0].text.contains("flowchart: start -> end"));
}

#[test]
fn byte_identical_chunks_collapse_across_the_run() {
    // Same solo table rendered on the same page number in two documents'
    // worth of pages: duplicate page entries within one run
    let make_page = || {
        let mut page = PageStructure::empty(4, 612.0, 792.0);
        page.tables.push(TableObject::new(
            1,
            BoundingBox::new(0.0, 100.0, 300.0, 200.0),
            vec![vec![Some("a".to_string())]],
        ));
        page
    };

    let chunks = chunk_document(
        &doc_with(vec![make_page(), make_page()]),
        &ChunkerOptions::default(),
    );

    let solo: Vec<&Chunk> = chunks
        .iter()
        .filter(|c| c.chunk_type == ChunkKind::TableOnly)
        .collect();
    assert_eq!(solo.len(), 1);
}

#[test]
fn fallback_chunk_always_carries_page_text() {
    let mut page = PageStructure::empty(2, 612.0, 792.0);
    page.full_text = "Line one.\nLine   two.".to_string();

    let chunks = chunk_document(&doc_with(vec![page]), &ChunkerOptions::default());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chunk_type, ChunkKind::FullTextFallback);
    assert_eq!(
        chunks[0].text,
        "[PAGE: 2]\n[CHUNK TYPE: FULL_TEXT_FALLBACK]\n\nLine one. Line two."
    );
    assert!(chunks[0].citations.is_empty());
}

#[test]
fn oversized_fallback_splits_with_headers_per_part() {
    let mut page = PageStructure::empty(1, 612.0, 792.0);
    page.full_text = "abcdefgh".repeat(50); // 400 chars

    let options = ChunkerOptions::new().with_max_chars(150);
    let chunks = chunk_document(&doc_with(vec![page]), &options);

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk
            .text
            .starts_with("[PAGE: 1]\n[CHUNK TYPE: FULL_TEXT_FALLBACK]\n\n"));
    }
}

#[test]
fn chunk_ids_are_unique_within_a_run() {
    let mut page = PageStructure::empty(1, 612.0, 792.0);
    page.full_text = "Some page text.".to_string();
    page.tables.push(TableObject::new(
        1,
        BoundingBox::new(0.0, 100.0, 300.0, 200.0),
        vec![vec![Some("x".to_string())]],
    ));
    page.blocks = vec![Block::new(Paragraph::new("Some page text.", 10.0, 30.0))];

    let chunks = chunk_document(&doc_with(vec![page]), &ChunkerOptions::default());
    let mut ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
    let before = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), before);
}
