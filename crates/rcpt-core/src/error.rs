//! Error types for the rcpt-core library.

use thiserror::Error;

/// Message shown to the user when OCR produced no usable text.
pub const NO_TEXT_DETECTED_MESSAGE: &str =
    "No text detected in the image. Please ensure the receipt is clear and well-lit.";

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Receipt extraction error.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// OCR provider error, passed through unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Record persistence error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the extractor.
///
/// Blank input is the only failure. Everything else degrades to
/// empty or default fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The input text was empty or whitespace-only.
    #[error("{}", NO_TEXT_DETECTED_MESSAGE)]
    NoTextDetected,
}

/// Errors raised by an OCR provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or the response could not be read.
    #[error("OCR request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success HTTP status.
    #[error("OCR API request failed: {status} {reason}")]
    Status { status: u16, reason: String },

    /// The provider reported a processing failure.
    #[error("OCR processing failed: {0}")]
    Processing(String),

    /// No API key was configured for a provider that needs one.
    #[error("no OCR API key configured")]
    MissingApiKey,
}

/// Errors related to storing receipt records.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_text_message() {
        assert_eq!(
            ExtractionError::NoTextDetected.to_string(),
            NO_TEXT_DETECTED_MESSAGE
        );

        let err: RcptError = ExtractionError::NoTextDetected.into();
        assert_eq!(err.to_string(), NO_TEXT_DETECTED_MESSAGE);
    }

    #[test]
    fn test_provider_error_passthrough() {
        let err: RcptError = ProviderError::Status {
            status: 403,
            reason: "Forbidden".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "OCR API request failed: 403 Forbidden");

        let err: RcptError = ProviderError::Processing("Unknown error".to_string()).into();
        assert_eq!(err.to_string(), "OCR processing failed: Unknown error");
    }
}
