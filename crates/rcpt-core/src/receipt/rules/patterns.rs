//! Common regex patterns and keyword lists for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Keywords marking a line that carries the receipt total.
pub const AMOUNT_KEYWORDS: &[&str] = &[
    "total amount",
    "total",
    "amount",
    "payable",
    "grand total",
    "net amount",
    "balance due",
];

/// Keywords that reclassify a receipt as incoming funds.
pub const CREDIT_KEYWORDS: &[&str] = &[
    "credit",
    "deposit",
    "received",
    "payment received",
    "refund",
];

/// Title used when the transcript has no non-empty line.
pub const DEFAULT_TITLE: &str = "Receipt";

/// Currency symbols stripped from the front of an amount.
pub const CURRENCY_SYMBOLS: &[char] = &['$', '₹', '€', '£'];

lazy_static! {
    // D/M/YYYY style (either order) or YYYY-MM-DD style, separators / and -
    pub static ref DATE: Regex = Regex::new(
        r"([0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{4})|([0-9]{4}[\-/][0-9]{2}[\-/][0-9]{2})"
    ).unwrap();

    // Optional currency symbol, integer part, optional two-digit fraction
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[$₹€£]?[0-9]+(?:\.[0-9]{2})?"
    ).unwrap();

    // Optional country code, then 3-3-4 digit groups. The closing boundary
    // is ASCII-only so letters from other scripts still end a number.
    pub static ref MOBILE: Regex = Regex::new(
        r"(\+?[0-9]{1,3}[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})(?-u:\b)"
    ).unwrap();
}
