//! The per-page linking pipeline.
//!
//! Drives raw page → lines → captions → caption linking → paragraphs →
//! paragraph linking → page structure, one page at a time. Pages share no
//! mutable state, so a run may fan out across a rayon pool; output page
//! order is restored by page number afterwards.
//!
//! Per-page failures (missing layout data, OCR errors, budget overruns)
//! never abort the run: the page degrades to an empty structure and the
//! failure is recorded on the resulting [`DocumentStructure`].

mod options;
mod source;

pub use options::PipelineOptions;
pub use source::{
    ImagePreprocessor, JsonPageSource, OcrEngine, PageSource, RasterImage, RawDocument, RawImage,
    RawPage, RawTable,
};

use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;

use crate::caption::CaptionDetector;
use crate::error::{Error, PageFailure, Result};
use crate::layout::{group_into_lines, group_into_paragraphs};
use crate::linker::{build_blocks, link_captions};
use crate::model::{DocumentStructure, ImageObject, PageStructure, TableObject};

/// A configured linking pipeline.
pub struct Pipeline {
    options: PipelineOptions,
    ocr: Option<Arc<dyn OcrEngine>>,
    preprocessor: Option<Arc<dyn ImagePreprocessor>>,
}

impl Pipeline {
    /// Create a pipeline with the given options and no OCR collaborators.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            ocr: None,
            preprocessor: None,
        }
    }

    /// Attach an OCR engine for images that carry raster data but no text.
    pub fn with_ocr(mut self, engine: Arc<dyn OcrEngine>) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Attach an image preprocessor run before OCR.
    pub fn with_preprocessor(mut self, preprocessor: Arc<dyn ImagePreprocessor>) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    /// Link every page of a document.
    ///
    /// Pages are numbered `1..=source.page_count()`. The returned structure
    /// lists pages in page-number order with all recorded degradations.
    pub fn process(
        &self,
        document_id: &str,
        source: Arc<dyn PageSource>,
    ) -> Result<DocumentStructure> {
        let page_count = source.page_count() as u32;
        let numbers: Vec<u32> = (1..=page_count).collect();

        log::info!(
            "linking {} pages of document {} ({})",
            page_count,
            document_id,
            if self.options.parallel { "parallel" } else { "sequential" }
        );

        let mut results: Vec<(PageStructure, Vec<PageFailure>)> = if self.options.parallel {
            numbers
                .par_iter()
                .map(|&n| self.process_page(n, &source))
                .collect()
        } else {
            numbers
                .iter()
                .map(|&n| self.process_page(n, &source))
                .collect()
        };

        // Completion order is not guaranteed under the pool; restore page order.
        results.sort_by_key(|(page, _)| page.page_number);

        let mut doc = DocumentStructure::new(document_id);
        for (page, failures) in results {
            doc.pages.push(page);
            doc.failures.extend(failures);
        }
        Ok(doc)
    }

    /// Process one page, honoring the configured budget.
    fn process_page(
        &self,
        page_number: u32,
        source: &Arc<dyn PageSource>,
    ) -> (PageStructure, Vec<PageFailure>) {
        match self.options.page_timeout {
            Some(timeout) => self.process_page_with_timeout(page_number, source, timeout),
            None => assemble_page(
                page_number,
                source.as_ref(),
                self.ocr.as_deref(),
                self.preprocessor.as_deref(),
                &self.options,
            ),
        }
    }

    /// Run a page on a worker thread bounded by `timeout`.
    ///
    /// On overrun the worker is abandoned (it finishes on its own time) and
    /// the page degrades to empty with a timeout record.
    fn process_page_with_timeout(
        &self,
        page_number: u32,
        source: &Arc<dyn PageSource>,
        timeout: Duration,
    ) -> (PageStructure, Vec<PageFailure>) {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let source = Arc::clone(source);
        let ocr = self.ocr.clone();
        let preprocessor = self.preprocessor.clone();
        let options = self.options.clone();

        std::thread::spawn(move || {
            let result = assemble_page(
                page_number,
                source.as_ref(),
                ocr.as_deref(),
                preprocessor.as_deref(),
                &options,
            );
            let _ = tx.send(result);
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(_) => {
                let err = Error::PageTimeout { page: page_number };
                log::warn!("{}", err);
                (
                    PageStructure::empty(page_number, 0.0, 0.0),
                    vec![PageFailure::from_error(&err).expect("timeout is page-scoped")],
                )
            }
        }
    }
}

/// Load, OCR-resolve and link one page.
fn assemble_page(
    page_number: u32,
    source: &dyn PageSource,
    ocr: Option<&dyn OcrEngine>,
    preprocessor: Option<&dyn ImagePreprocessor>,
    options: &PipelineOptions,
) -> (PageStructure, Vec<PageFailure>) {
    let mut raw = match source.load_page(page_number) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("{}", err);
            let failure = PageFailure::from_error(&err).unwrap_or(PageFailure {
                page: page_number,
                kind: crate::error::FailureKind::Layout,
                message: err.to_string(),
            });
            return (PageStructure::empty(page_number, 0.0, 0.0), vec![failure]);
        }
    };

    let mut failures = Vec::new();
    for image in &mut raw.images {
        resolve_ocr(page_number, image, ocr, preprocessor, &mut failures);
    }

    (link_page(raw, options), failures)
}

/// Fill in an image's OCR text through the collaborators.
///
/// Images that already carry text are left alone. Failure of either the
/// preprocessor or the engine records an OCR degradation and substitutes
/// the empty string; other images on the page are unaffected.
fn resolve_ocr(
    page_number: u32,
    image: &mut RawImage,
    ocr: Option<&dyn OcrEngine>,
    preprocessor: Option<&dyn ImagePreprocessor>,
    failures: &mut Vec<PageFailure>,
) {
    if image.ocr_text.is_some() {
        return;
    }
    let (Some(engine), Some(raster)) = (ocr, image.raster.as_ref()) else {
        return;
    };

    let recognized = match preprocessor {
        Some(pre) => pre.enhance(raster).and_then(|img| engine.recognize(&img)),
        None => engine.recognize(raster),
    };

    match recognized {
        Ok(text) => image.ocr_text = Some(text.trim().to_string()),
        Err(err) => {
            let err = Error::Ocr {
                page: page_number,
                message: err.to_string(),
            };
            log::warn!("{}", err);
            failures.push(PageFailure::from_error(&err).expect("OCR errors are page-scoped"));
            image.ocr_text = Some(String::new());
        }
    }
}

/// Link one raw page into a page structure.
///
/// Pure geometry and pattern work; any OCR resolution must already have
/// happened. Never fails.
pub fn link_page(raw: RawPage, options: &PipelineOptions) -> PageStructure {
    let detector = CaptionDetector::new();

    let mut tables: Vec<TableObject> = raw
        .tables
        .into_iter()
        .enumerate()
        .map(|(i, t)| TableObject::new(i + 1, t.bbox, t.rows))
        .collect();
    let mut images: Vec<ImageObject> = raw
        .images
        .into_iter()
        .enumerate()
        .map(|(i, img)| ImageObject::new(i + 1, img.bbox, img.ocr_text.unwrap_or_default()))
        .collect();

    let lines = group_into_lines(raw.words, options.y_threshold);
    let captions = detector.detect(&lines);
    link_captions(&captions, &mut tables, &mut images, &options.linker);

    let paragraphs = group_into_paragraphs(&lines, options.gap_threshold);
    let blocks = build_blocks(paragraphs, &tables, &images, raw.width, &options.linker);

    log::debug!(
        "page {}: {} lines, {} captions, {} tables, {} images, {} blocks",
        raw.page_number,
        lines.len(),
        captions.len(),
        tables.len(),
        images.len(),
        blocks.len()
    );

    PageStructure {
        page_number: raw.page_number,
        width: raw.width,
        height: raw.height,
        full_text: raw.full_text,
        captions,
        tables,
        images,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::layout::Word;

    fn raw_page() -> RawPage {
        RawPage {
            page_number: 1,
            width: 612.0,
            height: 792.0,
            full_text: "Table 1 Results Body text under the caption.".to_string(),
            words: vec![
                Word::new("Table", 10.0, 100.0, 50.0, 110.0),
                Word::new("1", 55.0, 100.0, 60.0, 110.0),
                Word::new("Body", 10.0, 260.0, 45.0, 270.0),
                Word::new("text", 50.0, 260.0, 80.0, 270.0),
            ],
            tables: vec![RawTable {
                bbox: BoundingBox::new(10.0, 130.0, 400.0, 240.0),
                rows: vec![vec![Some("a".to_string())]],
            }],
            images: vec![],
        }
    }

    #[test]
    fn test_link_page_end_to_end() {
        let page = link_page(raw_page(), &PipelineOptions::default());

        assert_eq!(page.captions.len(), 1);
        assert_eq!(page.captions[0].ordinal, "1");
        assert_eq!(
            page.tables[0].caption.as_ref().unwrap().text,
            page.captions[0].text
        );
        // Caption line and body line are far apart, so two paragraphs
        assert_eq!(page.blocks.len(), 2);
        // The body paragraph (center 265) is within 200 of the table (center 185)
        assert_eq!(page.blocks[1].table_refs, vec![0]);
    }

    #[test]
    fn test_link_page_empty_input() {
        let raw = RawPage {
            page_number: 3,
            width: 612.0,
            height: 792.0,
            full_text: String::new(),
            words: vec![],
            tables: vec![],
            images: vec![],
        };
        let page = link_page(raw, &PipelineOptions::default());
        assert!(page.is_empty());
        assert_eq!(page.page_number, 3);
    }
}
