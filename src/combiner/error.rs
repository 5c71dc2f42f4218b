use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CombineError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads, combines, or writes tabular data.
///
/// Every input-related variant carries the display name and the 1-based
/// upload position of the offending file so the user can fix that file.
#[derive(Debug, Error)]
pub enum CombineError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON serialization of a summary fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the CSV writer.
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    /// Raised when an input's bytes cannot be parsed as delimited text.
    #[error("file {position} ({name}) is not a readable CSV table: {source}")]
    MalformedTable {
        name: String,
        position: usize,
        #[source]
        source: csv::Error,
    },

    /// Raised when the first input has no header row to take column names from.
    #[error("file 1 ({name}) is empty; its header row is needed to define the columns")]
    SchemaUnavailable { name: String },

    /// Raised when a data row does not have as many values as the header has columns.
    #[error(
        "file {position} ({name}), line {line}: expected {expected} values per row, found {found}"
    )]
    ColumnCountMismatch {
        name: String,
        position: usize,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Raised in strict mode when a later header disagrees with the first file's.
    #[error("file {position} ({name}) has columns {found:?}, expected {expected:?}")]
    ColumnNameMismatch {
        name: String,
        position: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Raised when the requested field delimiter is not a single ASCII byte.
    #[error("delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl CombineError {
    /// Whether the failure stems from an input disagreeing with the first
    /// file's structure. Callers pair these with a remediation hint.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(
            self,
            CombineError::MalformedTable { .. }
                | CombineError::SchemaUnavailable { .. }
                | CombineError::ColumnCountMismatch { .. }
                | CombineError::ColumnNameMismatch { .. }
        )
    }
}
