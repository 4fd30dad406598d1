//! Page-level linked structure.

use serde::{Deserialize, Serialize};

use super::{Caption, ImageObject, Paragraph, TableObject};

/// A paragraph together with the objects the linking engine tied to it.
///
/// `table_refs` / `image_refs` index into the owning page's `tables` and
/// `images` vectors. Linkage is non-exclusive: an object may appear in any
/// number of blocks, and a block may reference any number of objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// The narrative paragraph
    pub paragraph: Paragraph,

    /// Indices of linked tables in page order
    pub table_refs: Vec<usize>,

    /// Indices of linked images in page order
    pub image_refs: Vec<usize>,
}

impl Block {
    /// Create a block with no linked objects.
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraph,
            table_refs: Vec::new(),
            image_refs: Vec::new(),
        }
    }

    /// Whether the block links to at least one object.
    pub fn has_links(&self) -> bool {
        !self.table_refs.is_empty() || !self.image_refs.is_empty()
    }
}

/// Fully linked content of a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStructure {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Raw extracted page text, independent of layout reconstruction
    pub full_text: String,

    /// Captions detected on the page, in reading order
    pub captions: Vec<Caption>,

    /// Detected tables, in extractor order
    pub tables: Vec<TableObject>,

    /// Detected images, in extractor order
    pub images: Vec<ImageObject>,

    /// Paragraph blocks with their linked objects
    pub blocks: Vec<Block>,
}

impl PageStructure {
    /// Create an empty page of the given dimensions.
    pub fn empty(page_number: u32, width: f32, height: f32) -> Self {
        Self {
            page_number,
            width,
            height,
            full_text: String::new(),
            captions: Vec::new(),
            tables: Vec::new(),
            images: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Check if the page carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
            && self.tables.is_empty()
            && self.images.is_empty()
            && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page() {
        let page = PageStructure::empty(3, 612.0, 792.0);
        assert_eq!(page.page_number, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_block_links() {
        let mut block = Block::new(Paragraph::new("a", 0.0, 10.0));
        assert!(!block.has_links());
        block.table_refs = vec![1, 0];
        assert!(block.has_links());

        let mut page = PageStructure::empty(1, 612.0, 792.0);
        page.blocks = vec![block];
        assert!(!page.is_empty());
    }
}
