//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, ReceiptParser};

use crate::error::ExtractionError;
use crate::models::receipt::ReceiptRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for receipt record extractors.
pub trait ReceiptExtractor {
    /// Extract a receipt record from an OCR transcript.
    fn extract(&self, text: &str) -> Result<ReceiptRecord>;
}

/// Extract a receipt record using the default keyword lists.
///
/// Fails only with [`ExtractionError::NoTextDetected`] for blank input.
pub fn extract(text: &str) -> Result<ReceiptRecord> {
    ReceiptParser::new().extract(text)
}
