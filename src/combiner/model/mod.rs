use std::path::Path;

use serde::Serialize;

/// One data row. Cell values are kept verbatim as text.
pub type Row = Vec<String>;

/// A named raw input, expected to hold CSV text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularInput {
    /// Display name used in error messages, usually the file name.
    pub name: String,
    /// Raw, fully buffered content.
    pub bytes: Vec<u8>,
}

impl TabularInput {
    /// Creates an input from a display name and its raw bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Derives the display name from the final component of `path`.
    pub fn from_path_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, bytes }
    }
}

/// The result of a combine operation: the first input's column names plus
/// every accepted row, in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl CombinedTable {
    /// Builds a table. Callers guarantee every row is `columns.len()` wide.
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns a copy holding at most the first `count` rows.
    pub fn head(&self, count: usize) -> CombinedTable {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(count).cloned().collect(),
        }
    }

    /// Appends rows already validated against the column count.
    pub(crate) fn extend_rows(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }
}
