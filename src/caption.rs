//! Caption detection.
//!
//! Classifies a line of text as a table caption, a figure caption, or
//! neither, extracting the label ordinal. Pure pattern work over line text;
//! no geometry is consulted here.

use regex::Regex;

use crate::layout::Line;
use crate::model::{Caption, CaptionKind};

/// Longest line that may be absorbed as a wrapped caption title.
const MAX_TITLE_LEN: usize = 140;

/// Detector holding the compiled caption patterns.
pub struct CaptionDetector {
    table_re: Regex,
    figure_re: Regex,
}

impl CaptionDetector {
    /// Compile the caption patterns.
    pub fn new() -> Self {
        Self {
            // "Table 3", "Table II", "TABLE iv" ...
            table_re: Regex::new(r"(?i)^table\s+([0-9]+|[ivxlcdm]+)\b").unwrap(),
            // "Fig. 3", "Fig 3", "Figure 12" ...
            figure_re: Regex::new(r"(?i)^(?:fig\.?|figure)\s+([0-9]+)\b").unwrap(),
        }
    }

    /// Classify a single line, with lookahead at the following line.
    ///
    /// When the line matches a caption pattern and the next line is short
    /// and entirely upper-case or title-case, the next line's text is
    /// appended to the caption (a wrapped title). The lookahead never
    /// consumes the next line: it remains in the line stream and is still
    /// grouped into paragraphs as usual.
    pub fn classify(&self, line: &Line, next: Option<&Line>) -> Option<Caption> {
        let text = line.text.trim();

        let (kind, ordinal) = if let Some(caps) = self.table_re.captures(text) {
            (CaptionKind::Table, caps[1].to_string())
        } else if let Some(caps) = self.figure_re.captures(text) {
            (CaptionKind::Figure, caps[1].to_string())
        } else {
            return None;
        };

        let mut caption_text = text.to_string();
        if let Some(next) = next {
            let title = next.text.trim();
            if !title.is_empty()
                && title.chars().count() < MAX_TITLE_LEN
                && (is_all_uppercase(title) || is_title_case(title))
            {
                caption_text.push(' ');
                caption_text.push_str(title);
            }
        }

        Some(Caption {
            kind,
            ordinal,
            text: caption_text,
            bbox: line.bbox,
        })
    }

    /// Detect all captions in a page's lines, in reading order.
    pub fn detect(&self, lines: &[Line]) -> Vec<Caption> {
        lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| self.classify(line, lines.get(i + 1)))
            .collect()
    }
}

impl Default for CaptionDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the text's letters are all upper-case (and there is at least one).
fn is_all_uppercase(text: &str) -> bool {
    let mut saw_letter = false;
    for c in text.chars().filter(|c| c.is_alphabetic()) {
        saw_letter = true;
        if !c.is_uppercase() {
            return false;
        }
    }
    saw_letter
}

/// Check if every word starts with an upper-case letter.
fn is_title_case(text: &str) -> bool {
    let mut saw_word = false;
    for word in text.split_whitespace() {
        if let Some(first) = word.chars().find(|c| c.is_alphabetic()) {
            saw_word = true;
            if !first.is_uppercase() {
                return false;
            }
        }
    }
    saw_word
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Word;

    fn line(text: &str) -> Line {
        let words: Vec<Word> = text
            .split_whitespace()
            .enumerate()
            .map(|(i, w)| Word::new(w, i as f32 * 30.0, 100.0, i as f32 * 30.0 + 25.0, 110.0))
            .collect();
        Line::from_words(&words).unwrap()
    }

    #[test]
    fn test_table_caption_roman_ordinal() {
        let detector = CaptionDetector::new();
        let caption = detector.classify(&line("Table II. Results"), None).unwrap();
        assert_eq!(caption.kind, CaptionKind::Table);
        assert_eq!(caption.ordinal, "II");
        assert_eq!(caption.ordinal_value(), Some(2));
    }

    #[test]
    fn test_figure_caption_abbreviated() {
        let detector = CaptionDetector::new();
        let caption = detector.classify(&line("Fig. 3"), None).unwrap();
        assert_eq!(caption.kind, CaptionKind::Figure);
        assert_eq!(caption.ordinal, "3");
    }

    #[test]
    fn test_figure_caption_spelled_out() {
        let detector = CaptionDetector::new();
        let caption = detector
            .classify(&line("Figure 12: throughput over time"), None)
            .unwrap();
        assert_eq!(caption.kind, CaptionKind::Figure);
        assert_eq!(caption.ordinal, "12");
    }

    #[test]
    fn test_plain_text_is_not_a_caption() {
        let detector = CaptionDetector::new();
        assert!(detector.classify(&line("Introduction"), None).is_none());
        assert!(detector
            .classify(&line("The table below shows results"), None)
            .is_none());
    }

    #[test]
    fn test_title_line_absorption_uppercase() {
        let detector = CaptionDetector::new();
        let next = line("EXPERIMENTAL RESULTS");
        let caption = detector.classify(&line("Table 1"), Some(&next)).unwrap();
        assert_eq!(caption.text, "Table 1 EXPERIMENTAL RESULTS");
    }

    #[test]
    fn test_title_line_absorption_title_case() {
        let detector = CaptionDetector::new();
        let next = line("Comparison Of Baseline Models");
        let caption = detector.classify(&line("Fig. 2"), Some(&next)).unwrap();
        assert_eq!(caption.text, "Fig. 2 Comparison Of Baseline Models");
    }

    #[test]
    fn test_body_text_next_line_is_not_absorbed() {
        let detector = CaptionDetector::new();
        let next = line("shows the measured latency for each run");
        let caption = detector.classify(&line("Fig. 2"), Some(&next)).unwrap();
        assert_eq!(caption.text, "Fig. 2");
    }

    #[test]
    fn test_long_title_is_not_absorbed() {
        let detector = CaptionDetector::new();
        let long = "A ".repeat(80); // 160 chars, every word upper-case
        let next = line(long.trim());
        let caption = detector.classify(&line("Table 1"), Some(&next)).unwrap();
        assert_eq!(caption.text, "Table 1");
    }

    #[test]
    fn test_detect_preserves_reading_order_and_stream() {
        let detector = CaptionDetector::new();
        let lines = vec![
            line("Table 1"),
            line("RESULTS"),
            line("Some body text follows here"),
            line("Fig. 2"),
        ];
        let captions = detector.detect(&lines);
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].kind, CaptionKind::Table);
        assert_eq!(captions[0].text, "Table 1 RESULTS");
        assert_eq!(captions[1].kind, CaptionKind::Figure);
        // Lookahead did not remove the absorbed line from the stream
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_caption_bbox_is_the_label_line() {
        let detector = CaptionDetector::new();
        let label = line("Table 1");
        let next = line("RESULTS");
        let caption = detector.classify(&label, Some(&next)).unwrap();
        assert_eq!(caption.bbox, label.bbox);
    }
}
