//! Error types for the pdfchunk library.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pdfchunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while linking and chunking page content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document file does not exist or cannot be opened.
    ///
    /// This is the one fatal condition: without a readable source there is
    /// no partial run to produce.
    #[error("document not found: {0}")]
    DocumentNotFound(PathBuf),

    /// The raw extraction dump is not valid JSON or has the wrong shape.
    #[error("raw extraction parse error: {0}")]
    Parse(String),

    /// Layout data for one page could not be obtained.
    #[error("layout extraction failed on page {page}: {message}")]
    LayoutExtraction {
        /// Page number (1-indexed)
        page: u32,
        /// Collaborator error text
        message: String,
    },

    /// OCR failed for an image on one page.
    #[error("OCR failed on page {page}: {message}")]
    Ocr {
        /// Page number (1-indexed)
        page: u32,
        /// Collaborator error text
        message: String,
    },

    /// Table region extraction failed on one page.
    #[error("table extraction failed on page {page}: {message}")]
    TableExtraction {
        /// Page number (1-indexed)
        page: u32,
        /// Collaborator error text
        message: String,
    },

    /// A page exceeded the configured processing budget.
    #[error("page {page} timed out")]
    PageTimeout {
        /// Page number (1-indexed)
        page: u32,
    },

    /// Error serializing output artifacts.
    #[error("rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Page number this error is scoped to, if it is a per-page failure.
    pub fn page(&self) -> Option<u32> {
        match self {
            Error::LayoutExtraction { page, .. }
            | Error::Ocr { page, .. }
            | Error::TableExtraction { page, .. }
            | Error::PageTimeout { page } => Some(*page),
            _ => None,
        }
    }

    /// Classify a per-page failure; `None` for fatal errors.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::LayoutExtraction { .. } => Some(FailureKind::Layout),
            Error::Ocr { .. } => Some(FailureKind::Ocr),
            Error::TableExtraction { .. } => Some(FailureKind::TableExtraction),
            Error::PageTimeout { .. } => Some(FailureKind::Timeout),
            _ => None,
        }
    }
}

/// Category of a recoverable per-page failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Word/position layout data missing or unreadable
    Layout,
    /// OCR collaborator failed
    Ocr,
    /// Table region extraction failed
    TableExtraction,
    /// Page exceeded the processing budget
    Timeout,
}

/// A recorded per-page degradation.
///
/// Failures never abort the run; they are persisted next to the results so
/// downstream consumers can tell degraded pages from genuinely empty ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFailure {
    /// Page number (1-indexed)
    pub page: u32,

    /// Failure category
    pub kind: FailureKind,

    /// Collaborator error text
    pub message: String,
}

impl PageFailure {
    /// Build a failure record from a per-page error.
    ///
    /// Returns `None` for errors that are not page-scoped.
    pub fn from_error(err: &Error) -> Option<Self> {
        Some(Self {
            page: err.page()?,
            kind: err.failure_kind()?,
            message: err.to_string(),
        })
    }
}
