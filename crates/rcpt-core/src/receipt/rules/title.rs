//! Title extraction for receipts.

use super::patterns::DEFAULT_TITLE;
use super::{non_empty_lines, ExtractionMatch, FieldExtractor};

/// Title extractor: the first non-empty line, trimmed.
pub struct TitleExtractor;

impl TitleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TitleExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        non_empty_lines(text)
            .into_iter()
            .map(|(offset, line)| {
                ExtractionMatch::new(line.to_string(), line)
                    .with_position(offset, offset + line.len())
            })
            .collect()
    }
}

/// Extract the title, falling back to `fallback` when every line is blank.
pub fn extract_title(text: &str, fallback: &str) -> String {
    TitleExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_else(|| fallback.to_string())
}

/// Extract the title with the default fallback.
pub fn extract_default_title(text: &str) -> String {
    extract_title(text, DEFAULT_TITLE)
}
