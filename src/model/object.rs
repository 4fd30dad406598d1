//! Captions and the externally detected content objects they label.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// What kind of object a caption labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionKind {
    /// A "Table N" label
    Table,
    /// A "Fig. N" / "Figure N" label
    Figure,
}

/// A short labeled line identifying a table or figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    /// Label kind
    pub kind: CaptionKind,

    /// Ordinal as matched from the text: a decimal number or a roman
    /// numeral, original casing preserved
    pub ordinal: String,

    /// Full caption text, including any absorbed title line
    pub text: String,

    /// Box of the caption line itself
    pub bbox: BoundingBox,
}

impl Caption {
    /// Best-effort numeric value of the ordinal.
    ///
    /// Parses decimal first, then roman numerals. Returns `None` for
    /// strings that are neither (the caption itself stays valid).
    pub fn ordinal_value(&self) -> Option<u32> {
        if let Ok(n) = self.ordinal.parse::<u32>() {
            return Some(n);
        }
        roman_to_u32(&self.ordinal)
    }
}

/// Parse a roman numeral (case-insensitive, subtractive notation).
fn roman_to_u32(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut total: u32 = 0;
    let mut prev: u32 = 0;
    for c in s.chars().rev() {
        let value = match c.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }
    Some(total)
}

/// An externally detected table region with its extracted cell matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableObject {
    /// 1-based table number within its page
    pub index: usize,

    /// Region box on the page
    pub bbox: BoundingBox,

    /// Extracted rows; cells may be absent where the extractor saw none
    pub rows: Vec<Vec<Option<String>>>,

    /// Caption assigned by the linking engine.
    ///
    /// Starts unset. When several captions score the same object, the
    /// last one in page order wins the slot.
    pub caption: Option<Caption>,
}

impl TableObject {
    /// Create an uncaptioned table object.
    pub fn new(index: usize, bbox: BoundingBox, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            index,
            bbox,
            rows,
            caption: None,
        }
    }

    /// Citation string: the caption text, or a positional fallback.
    pub fn citation(&self) -> String {
        match &self.caption {
            Some(c) => c.text.clone(),
            None => format!("Table {}", self.index),
        }
    }
}

/// An externally detected embedded image region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageObject {
    /// 1-based image number within its page
    pub index: usize,

    /// Region box on the page
    pub bbox: BoundingBox,

    /// Text recognized inside the region; empty when OCR produced nothing
    pub ocr_text: String,

    /// Caption assigned by the linking engine (same slot policy as tables)
    pub caption: Option<Caption>,
}

impl ImageObject {
    /// Create an uncaptioned image object.
    pub fn new(index: usize, bbox: BoundingBox, ocr_text: impl Into<String>) -> Self {
        Self {
            index,
            bbox,
            ocr_text: ocr_text.into(),
            caption: None,
        }
    }

    /// Citation string: the caption text, or a positional fallback.
    pub fn citation(&self) -> String {
        match &self.caption {
            Some(c) => c.text.clone(),
            None => format!("Image {}", self.index),
        }
    }
}
