//! Benchmarks for layout reconstruction and linking performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic page layouts: a grid of words with a
//! caption and a table region every few paragraphs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdfchunk::pipeline::{link_page, RawPage, RawTable};
use pdfchunk::{group_into_lines, BoundingBox, PipelineOptions, Word};

/// Build a synthetic page with `lines` lines of `words_per_line` words.
fn synthetic_words(lines: usize, words_per_line: usize) -> Vec<Word> {
    let mut words = Vec::with_capacity(lines * words_per_line);
    for row in 0..lines {
        let top = 40.0 + row as f32 * 14.0;
        for col in 0..words_per_line {
            let x0 = 36.0 + col as f32 * 48.0;
            words.push(Word::new(
                format!("w{}x{}", row, col),
                x0,
                top,
                x0 + 40.0,
                top + 10.0,
            ));
        }
    }
    words
}

/// Build a synthetic raw page with captions and table regions.
fn synthetic_page(lines: usize) -> RawPage {
    let mut words = synthetic_words(lines, 10);

    // A caption line and a table region every 12 lines
    let mut tables = Vec::new();
    for (i, row) in (0..lines).step_by(12).enumerate() {
        let top = 40.0 + row as f32 * 14.0;
        words.push(Word::new("Table", 36.0, top + 2.0, 76.0, top + 12.0));
        words.push(Word::new(
            format!("{}", i + 1),
            80.0,
            top + 2.0,
            90.0,
            top + 12.0,
        ));
        tables.push(RawTable {
            bbox: BoundingBox::new(36.0, top + 20.0, 560.0, top + 120.0),
            rows: vec![vec![Some("a".to_string()), Some("b".to_string())]],
        });
    }

    RawPage {
        page_number: 1,
        width: 612.0,
        height: 792.0,
        full_text: String::new(),
        words,
        tables,
        images: vec![],
    }
}

fn bench_group_into_lines(c: &mut Criterion) {
    let words = synthetic_words(50, 10);

    c.bench_function("group_into_lines_500_words", |b| {
        b.iter(|| group_into_lines(black_box(words.clone()), 3.0))
    });
}

fn bench_link_page(c: &mut Criterion) {
    let options = PipelineOptions::default();

    let small = synthetic_page(20);
    c.bench_function("link_page_20_lines", |b| {
        b.iter(|| link_page(black_box(small.clone()), &options))
    });

    let large = synthetic_page(200);
    c.bench_function("link_page_200_lines", |b| {
        b.iter(|| link_page(black_box(large.clone()), &options))
    });
}

criterion_group!(benches, bench_group_into_lines, bench_link_page);
criterion_main!(benches);
