//! WASM bindings for receipt OCR text extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and
//! JavaScript mobile clients that run OCR themselves.

use wasm_bindgen::prelude::*;

use rcpt_core::receipt::rules::{AMOUNT_KEYWORDS, CREDIT_KEYWORDS};
use rcpt_core::{ReceiptExtractor as _, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract a receipt record from OCR text.
///
/// Returns `{ date, title, mobile?, amount, description, type }` or throws
/// the "No text detected" message for blank input.
#[wasm_bindgen]
pub fn extract_receipt(text: &str) -> Result<JsValue, JsValue> {
    let record = rcpt_core::extract(text).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default keywords marking the total line.
#[wasm_bindgen]
pub fn default_amount_keywords() -> Vec<String> {
    AMOUNT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Default keywords classifying a receipt as income.
#[wasm_bindgen]
pub fn default_credit_keywords() -> Vec<String> {
    CREDIT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Receipt extractor class with configurable keyword lists.
#[wasm_bindgen]
pub struct ReceiptExtractor {
    amount_keywords: Vec<String>,
    credit_keywords: Vec<String>,
    parser: ReceiptParser,
}

#[wasm_bindgen]
impl ReceiptExtractor {
    /// Create an extractor with the default keyword lists.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            amount_keywords: default_amount_keywords(),
            credit_keywords: default_credit_keywords(),
            parser: ReceiptParser::new(),
        }
    }

    /// Replace the keywords marking the total line.
    #[wasm_bindgen]
    pub fn set_amount_keywords(&mut self, keywords: Vec<String>) {
        self.amount_keywords = keywords;
        self.rebuild();
    }

    /// Replace the keywords classifying a receipt as income.
    #[wasm_bindgen]
    pub fn set_credit_keywords(&mut self, keywords: Vec<String>) {
        self.credit_keywords = keywords;
        self.rebuild();
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let record = self
            .parser
            .extract(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        serde_wasm_bindgen::to_value(&record).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract a record along with the fields that fell back to defaults.
    #[wasm_bindgen]
    pub fn extract_with_warnings(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        #[derive(serde::Serialize)]
        struct ExtractResult {
            record: rcpt_core::ReceiptRecord,
            warnings: Vec<String>,
            processing_time_ms: u64,
        }

        let output = ExtractResult {
            record: result.record,
            warnings: result.warnings,
            processing_time_ms: result.processing_time_ms,
        };

        serde_wasm_bindgen::to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl ReceiptExtractor {
    fn rebuild(&mut self) {
        self.parser = ReceiptParser::new()
            .with_amount_keywords(&self.amount_keywords)
            .with_credit_keywords(&self.credit_keywords);
    }
}

impl Default for ReceiptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_receipt() {
        let value = extract_receipt("SHOP\nTotal: $45.00").unwrap();
        let record: rcpt_core::ReceiptRecord = serde_wasm_bindgen::from_value(value).unwrap();

        assert_eq!(record.amount, "45.00");
        assert_eq!(record.title, "SHOP");
    }

    #[wasm_bindgen_test]
    fn test_blank_input_throws() {
        assert!(extract_receipt("   ").is_err());
    }

    #[wasm_bindgen_test]
    fn test_custom_credit_keywords() {
        let mut extractor = ReceiptExtractor::new();
        extractor.set_credit_keywords(vec!["cashback".to_string()]);

        let value = extractor.extract("Cashback 5.00").unwrap();
        let record: rcpt_core::ReceiptRecord = serde_wasm_bindgen::from_value(value).unwrap();
        assert!(record.is_income());
    }
}
