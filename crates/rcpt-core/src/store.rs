//! Record persistence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::models::receipt::ReceiptRecord;

/// Default directory for stored records.
pub const DEFAULT_OUTPUT_DIR: &str = "OCR-receipt";

/// Default file name for the stored record.
pub const DEFAULT_OUTPUT_FILE: &str = "output.json";

/// Durable storage for extracted records.
pub trait RecordStore {
    /// Store a record, returning where it was written.
    fn save(&self, record: &ReceiptRecord) -> Result<PathBuf, StorageError>;
}

/// Writes the latest record as pretty-printed JSON to a single file.
///
/// Each save overwrites the previous record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
    file_name: String,
}

impl JsonFileStore {
    /// Store under `base/OCR-receipt/output.json`.
    pub fn in_base_dir(base: impl AsRef<Path>) -> Self {
        Self::new(base.as_ref().join(DEFAULT_OUTPUT_DIR))
    }

    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_name: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Full path of the output file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Read back the stored record.
    pub fn load(&self) -> Result<ReceiptRecord, StorageError> {
        let content = fs::read_to_string(self.path())?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl RecordStore for JsonFileStore {
    fn save(&self, record: &ReceiptRecord) -> Result<PathBuf, StorageError> {
        fs::create_dir_all(&self.directory)?;

        let path = self.path();
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&path, content)?;

        debug!("Wrote receipt record to {}", path.display());
        Ok(path)
    }
}
