//! Pipeline configuration.

use std::time::Duration;

use crate::layout::{DEFAULT_GAP_THRESHOLD, DEFAULT_Y_THRESHOLD};
use crate::linker::LinkerConfig;

/// Options for a linking run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Vertical tolerance when banding words into lines
    pub y_threshold: f32,

    /// Largest vertical gap that still joins two lines into a paragraph
    pub gap_threshold: f32,

    /// Linking engine knobs
    pub linker: LinkerConfig,

    /// Whether to process pages in parallel
    pub parallel: bool,

    /// Optional per-page processing budget.
    ///
    /// Pages exceeding it degrade to empty with a recorded timeout failure.
    pub page_timeout: Option<Duration>,
}

impl PipelineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line banding tolerance.
    pub fn with_y_threshold(mut self, threshold: f32) -> Self {
        self.y_threshold = threshold;
        self
    }

    /// Set the paragraph gap threshold.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = threshold;
        self
    }

    /// Set the linking engine configuration.
    pub fn with_linker(mut self, linker: LinkerConfig) -> Self {
        self.linker = linker;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the per-page processing budget.
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            y_threshold: DEFAULT_Y_THRESHOLD,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            linker: LinkerConfig::default(),
            parallel: true,
            page_timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = PipelineOptions::new()
            .with_y_threshold(2.0)
            .with_gap_threshold(10.0)
            .with_page_timeout(Duration::from_secs(30))
            .sequential();

        assert_eq!(options.y_threshold, 2.0);
        assert_eq!(options.gap_threshold, 10.0);
        assert_eq!(options.page_timeout, Some(Duration::from_secs(30)));
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert!(options.parallel);
        assert!(options.page_timeout.is_none());
        assert!(options.linker.caption_distance_cap.is_none());
    }
}
