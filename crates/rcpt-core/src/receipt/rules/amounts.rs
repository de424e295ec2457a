//! Amount extraction for receipts.

use tracing::trace;

use super::patterns::{AMOUNT_KEYWORDS, AMOUNT_TOKEN, CURRENCY_SYMBOLS};
use super::{non_empty_lines, ExtractionMatch, FieldExtractor};

/// Amount field extractor.
///
/// Totals usually sit near the bottom of a receipt, so keyword lines are
/// inspected from the last line upward. The first keyword line holding a
/// numeric token decides; earlier keyword lines are never looked at.
/// Without such a line the first numeric token anywhere in the text is used.
pub struct AmountExtractor {
    keywords: Vec<String>,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self::with_keywords(AMOUNT_KEYWORDS.iter().copied())
    }

    /// Use a custom keyword list. Keywords are matched case-insensitively.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Find the amount on the bottom-most keyword line that has one.
    pub fn extract_labeled(&self, text: &str) -> Option<ExtractionMatch<String>> {
        for (offset, line) in non_empty_lines(text).into_iter().rev() {
            let lower = line.to_lowercase();
            if !self.keywords.iter().any(|k| lower.contains(k.as_str())) {
                continue;
            }

            if let Some(m) = AMOUNT_TOKEN.find(line) {
                trace!("Amount keyword line: {:?}", line);
                return Some(
                    ExtractionMatch::new(strip_currency(m.as_str()).to_string(), m.as_str())
                        .with_position(offset + m.start(), offset + m.end()),
                );
            }
        }

        None
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_labeled(text)
            .or_else(|| self.extract_all(text).into_iter().next())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT_TOKEN
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(strip_currency(m.as_str()).to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract the best-guess total with the default keywords, or an empty string.
pub fn extract_amount(text: &str) -> String {
    AmountExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .unwrap_or_default()
}

/// Remove a leading currency symbol.
pub fn strip_currency(token: &str) -> &str {
    token.trim_start_matches(CURRENCY_SYMBOLS)
}
