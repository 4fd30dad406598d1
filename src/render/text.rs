//! Chunk text rendering.
//!
//! Produces the tagged plain-text form that chunks carry downstream:
//! `[PAGE: n]` / `[CHUNK TYPE: …]` headers, a `PARAGRAPH:` body, and
//! `[CITED TABLE: …]` / `[CITED FIGURE: …]` sections for linked objects.

use crate::model::{ChunkKind, ImageObject, TableObject};

/// Collapse all whitespace runs (spaces, newlines, tabs) to single spaces.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a table's cell matrix as pipe-delimited rows.
///
/// Missing cells render as empty fields so column positions stay aligned.
pub fn table_to_text(rows: &[Vec<Option<String>>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_deref().unwrap_or("").trim())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Render one chunk's text and collect its citations.
///
/// `paragraph` is the cleaned narrative body for paragraph chunks and
/// `None` for solo chunks.
pub fn render_chunk_text(
    page: u32,
    kind: ChunkKind,
    paragraph: Option<&str>,
    tables: &[&TableObject],
    images: &[&ImageObject],
) -> (String, Vec<String>) {
    let mut text = format!("[PAGE: {}]\n[CHUNK TYPE: {}]\n\n", page, kind.tag());
    let mut citations = Vec::new();

    if let Some(body) = paragraph {
        text.push_str("PARAGRAPH:\n");
        text.push_str(&clean_text(body));
        text.push_str("\n\n");
    }

    for table in tables {
        let citation = table.citation();
        text.push_str(&format!("[CITED TABLE: {}]\n", citation));
        text.push_str(&table_to_text(&table.rows));
        text.push_str("\n\n");
        citations.push(citation);
    }

    for image in images {
        let citation = image.citation();
        text.push_str(&format!("[CITED FIGURE: {}]\n", citation));
        let ocr = clean_text(&image.ocr_text);
        if ocr.is_empty() {
            text.push_str("(No OCR text extracted)\n\n");
        } else {
            text.push_str(&ocr);
            text.push_str("\n\n");
        }
        citations.push(citation);
    }

    (text.trim_end().to_string(), citations)
}

/// Split text into parts of at most `max_chars` characters.
///
/// Boundaries are fixed character counts; word and sentence breaks are not
/// respected.
pub fn split_long_text(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|part| part.iter().collect())
        .collect()
}
