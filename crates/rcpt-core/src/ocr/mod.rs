//! OCR provider seam.
//!
//! Recognition itself happens outside this crate. Providers hand back the
//! plain transcript; the extractor never sees images or provider responses.

use std::future::Future;

use crate::error::ProviderError;

/// A service that turns image bytes into recognized text.
pub trait OcrProvider {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Recognize the text in an image.
    ///
    /// An empty or blank transcript is a valid answer here; the scan
    /// pipeline turns it into `NoTextDetected`.
    fn recognize(
        &self,
        image: &[u8],
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Provider returning a fixed transcript. Useful when OCR already ran elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StaticTextProvider {
    text: String,
}

impl StaticTextProvider {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrProvider for StaticTextProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<String, ProviderError> {
        Ok(self.text.clone())
    }
}
