//! Date extraction for receipts.
//!
//! Dates are passed through exactly as printed. `03/04/2024` may be
//! March 4th or April 3rd depending on the issuer; the caller decides.

use super::patterns::DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE.find(text).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                .with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE.find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the first date-shaped substring, or an empty string.
pub fn extract_date(text: &str) -> String {
    DateExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_day_first() {
        assert_eq!(extract_date("Date: 15/01/2024 10:32"), "15/01/2024");
        assert_eq!(extract_date("5-1-2024"), "5-1-2024");
    }

    #[test]
    fn test_extract_date_year_first() {
        assert_eq!(extract_date("Issued 2024-01-15"), "2024-01-15");
        assert_eq!(extract_date("2024/01/15"), "2024/01/15");
    }

    #[test]
    fn test_ambiguous_date_is_verbatim() {
        assert_eq!(extract_date("03/04/2024"), "03/04/2024");
    }

    #[test]
    fn test_first_date_wins() {
        let text = "Printed 2024-02-01\nPaid 03/02/2024";
        let extractor = DateExtractor::new();

        let first = extractor.extract(text).unwrap();
        assert_eq!(first.value, "2024-02-01");
        assert_eq!(first.position, Some((8, 18)));

        let all = extractor.extract_all(text);
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].value, "03/02/2024");
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_date("THANK YOU 12:30"), "");
        assert_eq!(extract_date("15.01.2024"), "");
        assert_eq!(extract_date("24-01-15"), "");
    }

    #[test]
    fn test_date_inside_product_code() {
        // Known limitation: a code containing a date shape is reported as the date.
        assert_eq!(extract_date("SKU AB12/10/20245X"), "12/10/2024");
    }
}
