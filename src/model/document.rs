//! Document-level linked structure.

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use super::PageStructure;
use crate::error::PageFailure;

/// The persisted output of the linking phase for one document.
///
/// This is the sole contract between linking and chunk assembly; the chunk
/// assembler consumes nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Stable identity of the source document, normally its content hash
    pub document_id: String,

    /// When the linking run produced this structure
    pub generated_at: DateTime<Utc>,

    /// Linked pages in page-number order
    pub pages: Vec<PageStructure>,

    /// Per-page degradations recorded during the run
    pub failures: Vec<PageFailure>,
}

impl DocumentStructure {
    /// Create an empty structure for a document id.
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            generated_at: Utc::now(),
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of linked pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total tables across all pages.
    pub fn table_count(&self) -> usize {
        self.pages.iter().map(|p| p.tables.len()).sum()
    }

    /// Total images across all pages.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }

    /// Total captions across all pages.
    pub fn caption_count(&self) -> usize {
        self.pages.iter().map(|p| p.captions.len()).sum()
    }
}

/// Derive a document id from raw file content.
///
/// MD5 hex digest, matching the upload/cache naming convention used by the
/// surrounding ingestion tooling.
pub fn document_id_from_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
