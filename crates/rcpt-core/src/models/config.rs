//! Configuration structures for receipt extraction and scanning.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::receipt::ReceiptParser;
use crate::receipt::rules::{AMOUNT_KEYWORDS, CREDIT_KEYWORDS};
use crate::store::{JsonFileStore, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE};

/// Main configuration for rcpt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// OCR provider configuration.
    pub ocr: OcrConfig,

    /// Record output configuration.
    pub output: OutputConfig,
}

/// Keyword lists driving the extraction rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keywords marking the line that carries the total.
    pub amount_keywords: Vec<String>,

    /// Keywords that classify a receipt as income.
    pub credit_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            amount_keywords: AMOUNT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            credit_keywords: CREDIT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// OCR.space provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Endpoint receiving the image upload.
    pub endpoint: String,

    /// API key. The `RCPT_OCR_API_KEY` environment variable takes precedence.
    pub api_key: Option<String>,

    /// Recognition language code.
    pub language: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.ocr.space/parse/image".to_string(),
            api_key: None,
            language: "eng".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Where scanned records are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory.
    pub directory: PathBuf,

    /// Output file name.
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Build a parser using the configured keyword lists.
    pub fn parser(&self) -> ReceiptParser {
        ReceiptParser::new()
            .with_amount_keywords(&self.extraction.amount_keywords)
            .with_credit_keywords(&self.extraction.credit_keywords)
    }

    /// Build the record store for the configured output location.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.output.directory).with_file_name(self.output.file_name.clone())
    }
}
