//! Rule-based receipt parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::receipt::ReceiptRecord;

use super::rules::{
    trim_blank, AmountExtractor, DateExtractor, FieldExtractor, MobileExtractor, TitleExtractor,
    TransactionClassifier, DEFAULT_TITLE,
};
use super::{ReceiptExtractor, Result};

/// Result of receipt extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ReceiptRecord,
    /// Fields that fell back to their defaults.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Receipt parser running every field rule over the same transcript.
///
/// The rules are independent; a date inside the title line stays in the
/// title, a phone number may also be read as an amount, and so on.
pub struct ReceiptParser {
    dates: DateExtractor,
    amounts: AmountExtractor,
    mobiles: MobileExtractor,
    titles: TitleExtractor,
    classifier: TransactionClassifier,
}

impl ReceiptParser {
    /// Create a parser with the default keyword lists.
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::new(),
            amounts: AmountExtractor::new(),
            mobiles: MobileExtractor::new(),
            titles: TitleExtractor::new(),
            classifier: TransactionClassifier::new(),
        }
    }

    /// Set the keywords marking the total line.
    pub fn with_amount_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.amounts = AmountExtractor::with_keywords(keywords);
        self
    }

    /// Set the keywords classifying a receipt as income.
    pub fn with_credit_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.classifier = TransactionClassifier::with_keywords(keywords);
        self
    }

    pub fn amount_extractor(&self) -> &AmountExtractor {
        &self.amounts
    }

    pub fn classifier(&self) -> &TransactionClassifier {
        &self.classifier
    }

    /// Parse a transcript into a record plus extraction warnings.
    pub fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = start_timer();

        if trim_blank(text).is_empty() {
            return Err(ExtractionError::NoTextDetected);
        }

        info!("Parsing receipt from {} characters of text", text.len());

        let mut warnings = Vec::new();

        let date = match self.dates.extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract date".to_string());
                String::new()
            }
        };

        let amount = match self.amounts.extract(text) {
            Some(m) => {
                debug!("Amount {} taken from {:?}", m.value, m.source);
                m.value
            }
            None => {
                warnings.push("Could not extract amount".to_string());
                String::new()
            }
        };

        let mobile = self.mobiles.extract(text).map(|m| m.value);
        if mobile.is_none() {
            warnings.push("Could not extract phone number".to_string());
        }

        // Non-blank text always has a first line; the fallback keeps this total.
        let title = self
            .titles
            .extract(text)
            .map(|m| m.value)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let transaction_type = self.classifier.classify(text);

        let record = ReceiptRecord {
            date,
            title,
            mobile,
            amount,
            description: text.to_string(),
            transaction_type,
        };

        debug!(
            "Extracted receipt {:?} ({}) with {} warnings",
            record.title,
            record.transaction_type,
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            warnings,
            processing_time_ms: start
                .map(|s| s.elapsed().as_millis() as u64)
                .unwrap_or(0),
        })
    }
}

// `Instant::now` panics on wasm32-unknown-unknown.
#[cfg(not(target_arch = "wasm32"))]
fn start_timer() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn start_timer() -> Option<Instant> {
    None
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, text: &str) -> Result<ReceiptRecord> {
        self.parse(text).map(|r| r.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::TransactionType;
    use pretty_assertions::assert_eq;

    const GROCERY: &str = "FRESH MART\n\
        12 Market Street\n\
        Tel: (555) 123-4567\n\
        Date: 03/04/2024\n\
        Milk            2.49\n\
        Bread           3.10\n\
        Amount          99.00\n\
        Total          $12.50\n\
        THANK YOU";

    #[test]
    fn test_parse_grocery_receipt() {
        let record = ReceiptParser::new().extract(GROCERY).unwrap();

        assert_eq!(
            record,
            ReceiptRecord {
                date: "03/04/2024".to_string(),
                title: "FRESH MART".to_string(),
                mobile: Some("(555) 123-4567".to_string()),
                amount: "12.50".to_string(),
                description: GROCERY.to_string(),
                transaction_type: TransactionType::Expense,
            }
        );
    }

    #[test]
    fn test_blank_input_fails() {
        let parser = ReceiptParser::new();

        assert_eq!(parser.extract(""), Err(ExtractionError::NoTextDetected));
        assert_eq!(parser.extract("  \n\t \r\n"), Err(ExtractionError::NoTextDetected));
    }

    #[test]
    fn test_byte_order_mark_only_fails() {
        let parser = ReceiptParser::new();

        assert_eq!(parser.extract("\u{feff}"), Err(ExtractionError::NoTextDetected));
        assert_eq!(parser.extract("\u{feff}\n \u{feff} \n"), Err(ExtractionError::NoTextDetected));
    }

    #[test]
    fn test_leading_byte_order_mark_skipped_in_title() {
        let text = "\u{feff}\nFRESH MART\nTotal 1.00";
        let record = ReceiptParser::new().extract(text).unwrap();

        assert_eq!(record.title, "FRESH MART");
        assert_eq!(record.description, text);
    }

    #[test]
    fn test_description_is_verbatim() {
        let text = "  Shop \r\n\n\tTotal: $1.00  \n";
        let record = ReceiptParser::new().extract(text).unwrap();

        assert_eq!(record.description, text);
        assert_eq!(record.title, "Shop");
    }

    #[test]
    fn test_degrades_without_failing() {
        let result = ReceiptParser::new().parse("~~ ## ~~").unwrap();

        assert_eq!(result.record.date, "");
        assert_eq!(result.record.amount, "");
        assert_eq!(result.record.mobile, None);
        assert_eq!(result.record.title, "~~ ## ~~");
        assert_eq!(result.record.transaction_type, TransactionType::Expense);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_unusual_unicode() {
        let text = "Café ☕ 東京\nTotal ٣٤.٥٠\n😀";
        let record = ReceiptParser::new().extract(text).unwrap();

        assert_eq!(record.title, "Café ☕ 東京");
        assert_eq!(record.amount, "");
        assert_eq!(record.description, text);
    }

    #[test]
    fn test_idempotent() {
        let parser = ReceiptParser::new();
        assert_eq!(parser.extract(GROCERY), parser.extract(GROCERY));
    }

    #[test]
    fn test_income_receipt() {
        let text = "CITY BANK\nPayment received\n2024-05-01\nAmount: ₹5000.00";
        let record = ReceiptParser::new().extract(text).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Income);
        assert_eq!(record.amount, "5000.00");
        assert_eq!(record.date, "2024-05-01");
    }

    #[test]
    fn test_configured_keywords() {
        let parser = ReceiptParser::new()
            .with_amount_keywords(["summe"])
            .with_credit_keywords(["gutschrift"]);

        let record = parser
            .extract("BÄCKEREI\nTotal 1.00\nSUMME 4.20\nGutschrift")
            .unwrap();

        assert_eq!(record.amount, "4.20");
        assert_eq!(record.transaction_type, TransactionType::Income);
    }
}
