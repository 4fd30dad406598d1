//! Page-space geometry primitives.
//!
//! All coordinates live in the extractor's page space: origin at the top-left
//! corner, y increasing downward, units in points. Every heuristic in the
//! linking engine reduces to the handful of box operations defined here.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge (smaller y = higher on the page)
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a bounding box, normalizing flipped edges so that
    /// `x0 <= x1` and `top <= bottom` always hold.
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            x0: x0.min(x1),
            top: top.min(bottom),
            x1: x0.max(x1),
            bottom: top.max(bottom),
        }
    }

    /// Box width. Zero-area boxes are legal and simply rank far away.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Vertical midpoint.
    pub fn vertical_center(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    /// Absolute distance between the vertical centers of two boxes.
    pub fn vertical_center_distance(&self, other: &BoundingBox) -> f32 {
        (self.vertical_center() - other.vertical_center()).abs()
    }

    /// Whether the horizontal extents of two boxes intersect.
    ///
    /// Touching edges count as overlap.
    pub fn horizontally_overlaps(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x0
            && self.top <= other.top
            && self.x1 >= other.x1
            && self.bottom >= other.bottom
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Union of a non-empty sequence of boxes.
    pub fn union_all<'a>(mut boxes: impl Iterator<Item = &'a BoundingBox>) -> Option<BoundingBox> {
        let first = *boxes.next()?;
        Some(boxes.fold(first, |acc, b| acc.union(b)))
    }
}
