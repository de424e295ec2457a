//! Transaction direction classification.

use crate::models::receipt::TransactionType;

use super::patterns::CREDIT_KEYWORDS;

/// Classifies a receipt as income when any credit keyword occurs anywhere.
///
/// A single case-insensitive substring hit is enough; there is no weighting.
pub struct TransactionClassifier {
    keywords: Vec<String>,
}

impl TransactionClassifier {
    pub fn new() -> Self {
        Self::with_keywords(CREDIT_KEYWORDS.iter().copied())
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

    pub fn classify(&self, text: &str) -> TransactionType {
        if self.matched_keyword(text).is_some() {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    /// The first configured keyword found in `text`.
    pub fn matched_keyword(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(String::as_str)
    }
}

impl Default for TransactionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the default credit keywords.
pub fn classify_transaction(text: &str) -> TransactionType {
    TransactionClassifier::new().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_received_is_income() {
        assert_eq!(
            classify_transaction("ACME\nPayment received\n$20.00"),
            TransactionType::Income
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(classify_transaction("REFUND ISSUED"), TransactionType::Income);
        assert_eq!(classify_transaction("Cash Deposit"), TransactionType::Income);
    }

    #[test]
    fn test_plain_purchase_is_expense() {
        assert_eq!(
            classify_transaction("GROCERY\nMilk 2.00\nTotal 2.00"),
            TransactionType::Expense
        );
    }

    #[test]
    fn test_substring_match() {
        // "credit card" still reads as a credit keyword.
        assert_eq!(
            classify_transaction("Paid by credit card"),
            TransactionType::Income
        );
    }

    #[test]
    fn test_custom_keywords() {
        let classifier = TransactionClassifier::with_keywords(["Cashback"]);
        assert_eq!(classifier.matched_keyword("CASHBACK 5.00"), Some("cashback"));
        assert_eq!(classifier.classify("refund"), TransactionType::Expense);
    }
}
