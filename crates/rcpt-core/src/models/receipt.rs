//! Receipt record model.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A structured record extracted from one receipt transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// First date-shaped substring, verbatim. Empty when none was found.
    pub date: String,

    /// Best-guess label for the receipt.
    pub title: String,

    /// First phone-number-shaped substring, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Best-guess total with the currency symbol stripped. Empty when none was found.
    pub amount: String,

    /// The full OCR transcript, untouched.
    pub description: String,

    /// Direction of the transaction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl ReceiptRecord {
    /// Parse the amount as a decimal number.
    pub fn amount_value(&self) -> Option<Decimal> {
        if self.amount.is_empty() {
            return None;
        }
        Decimal::from_str(&self.amount).ok()
    }

    /// Whether the record was classified as incoming funds.
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// Transaction direction of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money received (credit, deposit, refund).
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl Default for TransactionType {
    fn default() -> Self {
        Self::Expense
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ReceiptRecord {
        ReceiptRecord {
            date: "12/03/2024".to_string(),
            title: "CORNER CAFE".to_string(),
            mobile: None,
            amount: "45.00".to_string(),
            description: "CORNER CAFE\n12/03/2024\nTotal: $45.00".to_string(),
            transaction_type: TransactionType::Expense,
        }
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["type"], "Expense");
        assert_eq!(json["amount"], "45.00");
        assert!(json.get("mobile").is_none());
        assert!(json.get("transaction_type").is_none());
    }

    #[test]
    fn test_json_with_mobile() {
        let mut record = sample();
        record.mobile = Some("(555) 123-4567".to_string());
        record.transaction_type = TransactionType::Income;

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""mobile":"(555) 123-4567""#));
        assert!(json.contains(r#""type":"Income""#));

        let back: ReceiptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_amount_value() {
        assert_eq!(
            sample().amount_value(),
            Some(Decimal::from_str("45.00").unwrap())
        );

        let mut record = sample();
        record.amount = String::new();
        assert_eq!(record.amount_value(), None);
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(" Expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("refund".parse::<TransactionType>().is_err());
        assert_eq!(TransactionType::Income.to_string(), "Income");
    }
}
