//! Scan pipeline: OCR provider, extractor, store.

use tracing::{debug, info};

use crate::error::Result;
use crate::models::receipt::ReceiptRecord;
use crate::ocr::OcrProvider;
use crate::receipt::{ReceiptExtractor, ReceiptParser};
use crate::store::RecordStore;

/// Runs one receipt image through recognition, extraction and storage.
pub struct ReceiptScanner<P> {
    provider: P,
    parser: ReceiptParser,
    store: Option<Box<dyn RecordStore + Send + Sync>>,
}

impl<P: OcrProvider> ReceiptScanner<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            parser: ReceiptParser::new(),
            store: None,
        }
    }

    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Persist every scanned record to `store`.
    pub fn with_store(mut self, store: impl RecordStore + Send + Sync + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Scan a receipt image.
    ///
    /// Provider failures are returned unchanged. A blank transcript fails
    /// with `NoTextDetected` before anything is stored.
    pub async fn scan(&self, image: &[u8]) -> Result<ReceiptRecord> {
        info!(
            "Recognizing {} bytes with {} provider",
            image.len(),
            self.provider.name()
        );

        let text = self.provider.recognize(image).await?;
        debug!("Provider returned {} characters", text.len());

        let record = self.parser.extract(&text)?;

        if let Some(store) = &self.store {
            let path = store.save(&record)?;
            info!("Saved receipt record to {}", path.display());
        }

        Ok(record)
    }
}
