//! Phone number extraction for receipts.

use super::patterns::MOBILE;
use super::{ExtractionMatch, FieldExtractor};

/// Phone number extractor.
///
/// Matches a 3-3-4 digit shape with optional country code, parentheses
/// and separators. Country codes are not checked for plausibility.
pub struct MobileExtractor;

impl MobileExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MobileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MobileExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        MOBILE.find(text).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                .with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        MOBILE
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the first phone-number-shaped substring.
pub fn extract_mobile(text: &str) -> Option<String> {
    MobileExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(
            extract_mobile("Call 555-123-4567 for orders"),
            Some("555-123-4567".to_string())
        );
        assert_eq!(
            extract_mobile("Tel: 9876543210"),
            Some("9876543210".to_string())
        );
    }

    #[test]
    fn test_country_code_and_parentheses() {
        assert_eq!(
            extract_mobile("Ph +1 (555) 123-4567"),
            Some("+1 (555) 123-4567".to_string())
        );
        assert_eq!(
            extract_mobile("+44.207.946.0958"),
            Some("+44.207.946.0958".to_string())
        );
    }

    #[test]
    fn test_number_next_to_non_ascii_letters() {
        assert_eq!(
            extract_mobile("電話5551234567番"),
            Some("5551234567".to_string())
        );
        assert_eq!(
            extract_mobile("Tel 5551234567é"),
            Some("5551234567".to_string())
        );
    }

    #[test]
    fn test_longer_ascii_run_is_not_cut() {
        assert_eq!(extract_mobile("Ref 5551234567A"), None);
    }

    #[test]
    fn test_no_mobile_is_absent() {
        assert_eq!(extract_mobile("Total: $45.00\n03/04/2024"), None);
    }

    #[test]
    fn test_invoice_number_reads_as_phone() {
        // Known limitation: any 10-digit run looks like a phone number.
        assert_eq!(
            extract_mobile("Invoice 4000123456"),
            Some("4000123456".to_string())
        );
    }

    #[test]
    fn test_extract_all() {
        let found = MobileExtractor::new().extract_all("555-123-4567 / 555-765-4321");
        let values: Vec<_> = found.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["555-123-4567", "555-765-4321"]);
    }
}
