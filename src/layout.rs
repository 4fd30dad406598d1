//! Layout reconstruction from word positions.
//!
//! The external extractor hands over a flat bag of words with page-space
//! boxes. This module rebuilds reading structure from it in two passes:
//! words are banded into lines by vertical position, then lines are merged
//! into paragraphs by vertical gap.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::model::Paragraph;

/// Default vertical tolerance when banding words into a line, in points.
pub const DEFAULT_Y_THRESHOLD: f32 = 3.0;

/// Default vertical gap that still joins two lines into one paragraph.
pub const DEFAULT_GAP_THRESHOLD: f32 = 12.0;

/// A positioned text token, the atomic input unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Token text
    pub text: String,
    /// Position on the page
    pub bbox: BoundingBox,
}

impl Word {
    /// Create a word from text and box edges.
    pub fn new(text: impl Into<String>, x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            bbox: BoundingBox::new(x0, top, x1, bottom),
        }
    }
}

/// A horizontal band of words sharing a vertical position.
///
/// Built only through [`Line::from_words`]; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Space-joined member word texts
    pub text: String,
    /// Union of the member word boxes
    pub bbox: BoundingBox,
}

impl Line {
    /// Build a line from its member words (already in reading order).
    ///
    /// Returns `None` for an empty word list.
    pub fn from_words(words: &[Word]) -> Option<Self> {
        let bbox = BoundingBox::union_all(words.iter().map(|w| &w.bbox))?;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        Some(Self { text, bbox })
    }

    /// Top edge of the line.
    pub fn top(&self) -> f32 {
        self.bbox.top
    }

    /// Bottom edge of the line.
    pub fn bottom(&self) -> f32 {
        self.bbox.bottom
    }
}

/// Group extracted words into lines using their vertical position.
///
/// Words are sorted by `(top, x0)` and scanned in order. A word joins the
/// current line while its `top` is within `y_threshold` of the line anchor;
/// otherwise the line is closed and a new one starts. The anchor stays at
/// the first word of the line, not a running average, so `top` drift across
/// a long line accumulates against the same reference.
pub fn group_into_lines(mut words: Vec<Word>, y_threshold: f32) -> Vec<Line> {
    if words.is_empty() {
        return vec![];
    }

    words.sort_by(|a, b| {
        a.bbox
            .top
            .partial_cmp(&b.bbox.top)
            .unwrap_or(Ordering::Equal)
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap_or(Ordering::Equal))
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut anchor_top = words[0].bbox.top;

    for word in words {
        if current.is_empty() || (word.bbox.top - anchor_top).abs() <= y_threshold {
            if current.is_empty() {
                anchor_top = word.bbox.top;
            }
            current.push(word);
        } else {
            if let Some(line) = Line::from_words(&current) {
                lines.push(line);
            }
            anchor_top = word.bbox.top;
            current = vec![word];
        }
    }

    if let Some(line) = Line::from_words(&current) {
        lines.push(line);
    }

    lines
}

/// Merge consecutive lines into paragraphs based on vertical gaps.
///
/// Lines must already be in top-to-bottom order (the order produced by
/// [`group_into_lines`]). Two lines stay in the same paragraph while
/// `next.top - prev.bottom <= gap_threshold`. Paragraph text is the
/// single-space join of its line texts; `top`/`bottom` span the extent.
pub fn group_into_paragraphs(lines: &[Line], gap_threshold: f32) -> Vec<Paragraph> {
    let Some(first) = lines.first() else {
        return vec![];
    };

    let mut paragraphs: Vec<Paragraph> = Vec::new();
    let mut text = first.text.clone();
    let mut top = first.top();
    let mut bottom = first.bottom();
    let mut prev_bottom = first.bottom();

    for line in &lines[1..] {
        let gap = line.top() - prev_bottom;
        if gap > gap_threshold {
            paragraphs.push(Paragraph::new(text.trim(), top, bottom));
            text = line.text.clone();
            top = line.top();
            bottom = line.bottom();
        } else {
            text.push(' ');
            text.push_str(&line.text);
            bottom = bottom.max(line.bottom());
        }
        prev_bottom = line.bottom();
    }

    paragraphs.push(Paragraph::new(text.trim(), top, bottom));
    paragraphs
}
