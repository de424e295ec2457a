//! Rule-based field extractors for receipt transcripts.

pub mod amounts;
pub mod dates;
pub mod mobile;
pub mod patterns;
pub mod title;
pub mod transaction;

pub use amounts::{extract_amount, strip_currency, AmountExtractor};
pub use dates::{extract_date, DateExtractor};
pub use mobile::{extract_mobile, MobileExtractor};
pub use patterns::*;
pub use title::{extract_default_title, extract_title, TitleExtractor};
pub use transaction::{classify_transaction, TransactionClassifier};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched field value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Whitespace plus the byte order mark OCR output sometimes starts with.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Trim whitespace and byte order marks from both ends.
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank_char)
}

/// Trimmed, non-empty lines of `text` with their byte offset into `text`.
pub(crate) fn non_empty_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;

    for raw in text.split('\n') {
        let trimmed = trim_blank(raw);
        if !trimmed.is_empty() {
            let lead = raw.len() - raw.trim_start_matches(is_blank_char).len();
            lines.push((offset + lead, trimmed));
        }
        offset += raw.len() + 1;
    }

    lines
}
