//! Core library for receipt OCR text extraction.
//!
//! This crate provides:
//! - Rule-based field extraction from raw OCR text (date, title, phone, amount, type)
//! - The receipt record model and its JSON shape
//! - Collaborator seams for OCR providers and record persistence
//! - A scan pipeline tying provider, extractor and store together

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod scanner;
pub mod store;

pub use error::{RcptError, Result};
pub use models::config::RcptConfig;
pub use models::receipt::{ReceiptRecord, TransactionType};
pub use ocr::OcrProvider;
pub use receipt::{extract, ExtractionResult, ReceiptExtractor, ReceiptParser};
pub use scanner::ReceiptScanner;
pub use store::{JsonFileStore, RecordStore};
