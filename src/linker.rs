//! The caption/paragraph-to-object linking engine.
//!
//! Captions link to a single object by overlap-biased nearest neighbor:
//! captions sit directly adjacent to and usually horizontally aligned with
//! their referent. Paragraphs link to any object inside a generous,
//! direction-agnostic vertical window, because body text can reference
//! objects above or below it in the same flow.
//!
//! Linking is pure geometry over already-validated data and has no error
//! channel: degenerate boxes rank, they never fail.

use crate::geometry::BoundingBox;
use crate::model::{Block, Caption, CaptionKind, ImageObject, Paragraph, TableObject};

/// Default score reduction for horizontally overlapping caption/object pairs.
pub const DEFAULT_OVERLAP_BONUS: f32 = 50.0;

/// Default vertical window for paragraph-to-object linking, in points.
pub const DEFAULT_PARAGRAPH_MAX_DISTANCE: f32 = 200.0;

/// Tuning knobs for the linking engine.
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    /// Amount subtracted from a caption candidate's score when the caption
    /// and object boxes overlap horizontally
    pub overlap_bonus: f32,

    /// Vertical-center distance within which a paragraph claims an object
    pub paragraph_max_distance: f32,

    /// Optional hard cap on caption-to-object distance.
    ///
    /// `None` keeps the closest-wins policy with no cap: on a sparse page a
    /// caption may link to an arbitrarily distant object.
    pub caption_distance_cap: Option<f32>,
}

impl LinkerConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal-overlap bonus.
    pub fn with_overlap_bonus(mut self, bonus: f32) -> Self {
        self.overlap_bonus = bonus;
        self
    }

    /// Set the paragraph linking window.
    pub fn with_paragraph_max_distance(mut self, distance: f32) -> Self {
        self.paragraph_max_distance = distance;
        self
    }

    /// Cap caption-to-object linking distance.
    pub fn with_caption_distance_cap(mut self, cap: f32) -> Self {
        self.caption_distance_cap = Some(cap);
        self
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            overlap_bonus: DEFAULT_OVERLAP_BONUS,
            paragraph_max_distance: DEFAULT_PARAGRAPH_MAX_DISTANCE,
            caption_distance_cap: None,
        }
    }
}

/// Pick the best-matching candidate box for a caption.
///
/// Score = vertical-center distance, minus `overlap_bonus` when the boxes
/// overlap horizontally. The minimum score wins; comparison is strict `<`,
/// so on a tie the first candidate in encounter order keeps the slot.
/// Returns the candidate index, or `None` when there are no candidates (or
/// all of them fall outside `caption_distance_cap`, when set).
pub fn link_caption(
    caption: &Caption,
    candidates: &[BoundingBox],
    config: &LinkerConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (index, bbox) in candidates.iter().enumerate() {
        let distance = caption.bbox.vertical_center_distance(bbox);
        if let Some(cap) = config.caption_distance_cap {
            if distance > cap {
                continue;
            }
        }

        let mut score = distance;
        if caption.bbox.horizontally_overlaps(bbox) {
            score -= config.overlap_bonus;
        }

        if best.map_or(true, |(_, best_score)| score < best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Assign captions to their objects, in page order.
///
/// Each caption links to at most one object of its kind. Objects expose a
/// single caption slot; when several captions pick the same object, the
/// last caption in page order overwrites earlier assignments.
pub fn link_captions(
    captions: &[Caption],
    tables: &mut [TableObject],
    images: &mut [ImageObject],
    config: &LinkerConfig,
) {
    for caption in captions {
        match caption.kind {
            CaptionKind::Table => {
                let boxes: Vec<BoundingBox> = tables.iter().map(|t| t.bbox).collect();
                if let Some(index) = link_caption(caption, &boxes, config) {
                    if tables[index].caption.is_some() {
                        log::debug!(
                            "table {} caption overwritten by later caption {:?}",
                            tables[index].index,
                            caption.text
                        );
                    }
                    tables[index].caption = Some(caption.clone());
                }
            }
            CaptionKind::Figure => {
                let boxes: Vec<BoundingBox> = images.iter().map(|i| i.bbox).collect();
                if let Some(index) = link_caption(caption, &boxes, config) {
                    if images[index].caption.is_some() {
                        log::debug!(
                            "image {} caption overwritten by later caption {:?}",
                            images[index].index,
                            caption.text
                        );
                    }
                    images[index].caption = Some(caption.clone());
                }
            }
        }
    }
}

/// Collect the candidate objects a paragraph refers to.
///
/// The paragraph is widened to a synthetic box spanning the full page width
/// at its vertical extent; a candidate is included when its vertical-center
/// distance to that box is within `max_distance`. No overlap bonus applies
/// (the synthetic box already spans the page). The returned indices follow
/// the input candidate order, not distance order.
pub fn link_paragraph(
    paragraph: &Paragraph,
    candidates: &[BoundingBox],
    page_width: f32,
    max_distance: f32,
) -> Vec<usize> {
    let synthetic = BoundingBox::new(0.0, paragraph.top, page_width, paragraph.bottom);

    candidates
        .iter()
        .enumerate()
        .filter(|(_, bbox)| synthetic.vertical_center_distance(bbox) <= max_distance)
        .map(|(index, _)| index)
        .collect()
}

/// Build paragraph blocks with their linked object references.
pub fn build_blocks(
    paragraphs: Vec<Paragraph>,
    tables: &[TableObject],
    images: &[ImageObject],
    page_width: f32,
    config: &LinkerConfig,
) -> Vec<Block> {
    let table_boxes: Vec<BoundingBox> = tables.iter().map(|t| t.bbox).collect();
    let image_boxes: Vec<BoundingBox> = images.iter().map(|i| i.bbox).collect();

    paragraphs
        .into_iter()
        .map(|paragraph| {
            let table_refs = link_paragraph(
                &paragraph,
                &table_boxes,
                page_width,
                config.paragraph_max_distance,
            );
            let image_refs = link_paragraph(
                &paragraph,
                &image_boxes,
                page_width,
                config.paragraph_max_distance,
            );
            Block {
                paragraph,
                table_refs,
                image_refs,
            }
        })
        .collect()
}
