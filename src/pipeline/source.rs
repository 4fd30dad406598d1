//! External collaborator seams.
//!
//! The pipeline never touches PDF binaries, OCR engines, or image
//! processing itself; it consumes their output through the traits here.
//! [`JsonPageSource`] is the shipped implementation, reading the raw
//! extraction dump that upstream tooling persists to disk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::layout::Word;

/// An opaque raster payload handed to OCR collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterImage {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Raw pixel data; layout is whatever the extractor produced
    #[serde(default)]
    pub data: Vec<u8>,
}

/// A detected table region as delivered by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    /// Region box on the page
    pub bbox: BoundingBox,
    /// Extracted cell matrix; cells may be null
    #[serde(default)]
    pub rows: Vec<Vec<Option<String>>>,
}

/// A detected embedded image region as delivered by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawImage {
    /// Region box on the page
    pub bbox: BoundingBox,

    /// Recognized text, when the extractor already ran OCR
    #[serde(default)]
    pub ocr_text: Option<String>,

    /// Raster data for deferred OCR
    #[serde(default)]
    pub raster: Option<RasterImage>,
}

/// One page of raw extraction output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Raw extracted page text
    #[serde(default)]
    pub full_text: String,
    /// Positioned words
    #[serde(default)]
    pub words: Vec<Word>,
    /// Detected table regions
    #[serde(default)]
    pub tables: Vec<RawTable>,
    /// Detected image regions
    #[serde(default)]
    pub images: Vec<RawImage>,
}

/// The whole raw extraction dump for a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    /// Optional extractor-assigned document id
    #[serde(default)]
    pub document_id: Option<String>,
    /// Extracted pages
    #[serde(default)]
    pub pages: Vec<RawPage>,
}

/// Black-box page layout collaborator.
pub trait PageSource: Send + Sync {
    /// Number of pages the source can deliver.
    fn page_count(&self) -> usize;

    /// Load one page's raw extraction data.
    fn load_page(&self, page_number: u32) -> Result<RawPage>;
}

/// Black-box OCR collaborator.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a raster image.
    fn recognize(&self, image: &RasterImage) -> Result<String>;
}

/// Black-box image enhancement collaborator.
///
/// Contract: the output has the same dimensions as the input and is
/// monochrome-thresholded for OCR.
pub trait ImagePreprocessor: Send + Sync {
    /// Enhance a raster image for recognition.
    fn enhance(&self, image: &RasterImage) -> Result<RasterImage>;
}

/// Page source backed by a raw extraction JSON dump.
#[derive(Debug)]
pub struct JsonPageSource {
    document_id: String,
    pages: Vec<RawPage>,
}

impl JsonPageSource {
    /// Open a raw extraction dump from disk.
    ///
    /// A missing or unreadable file is fatal: there is no partial run
    /// without a source.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::DocumentNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::from_bytes(&data)
    }

    /// Parse a raw extraction dump from bytes.
    ///
    /// When the dump does not carry a `document_id`, the MD5 digest of the
    /// bytes becomes the id.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let dump: RawDocument =
            serde_json::from_slice(data).map_err(|e| Error::Parse(e.to_string()))?;
        let document_id = dump
            .document_id
            .unwrap_or_else(|| crate::model::document_id_from_bytes(data));
        Ok(Self {
            document_id,
            pages: dump.pages,
        })
    }

    /// Stable identity of the document behind this source.
    pub fn document_id(&self) -> &str {
        &self.document_id
    }
}

impl PageSource for JsonPageSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn load_page(&self, page_number: u32) -> Result<RawPage> {
        self.pages
            .iter()
            .find(|p| p.page_number == page_number)
            .cloned()
            .ok_or_else(|| Error::LayoutExtraction {
                page: page_number,
                message: "page not present in extraction dump".to_string(),
            })
    }
}
