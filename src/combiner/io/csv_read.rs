use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::combiner::error::{CombineError, Result};
use crate::combiner::model::{Row, TabularInput};

/// A data record together with the source line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub line: u64,
    pub values: Row,
}

/// Raw parse of one input: its first record, kept apart, and every record
/// after it. Nothing is padded or truncated here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTable {
    pub header: Option<Row>,
    pub records: Vec<ParsedRecord>,
}

/// Parses `input` as delimited text. `position` is the 1-based upload
/// position, used only for error reporting. Blank lines are skipped.
pub fn read_table(input: &TabularInput, position: usize, delimiter: u8) -> Result<ParsedTable> {
    // Headers are split off by hand so the first record is treated the same
    // way whatever it contains; flexible mode lets the caller see bad widths.
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(input.bytes.as_slice());

    let mut table = ParsedTable::default();
    let mut record = StringRecord::new();
    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|source| CombineError::MalformedTable {
                name: input.name.clone(),
                position,
                source,
            })?;
        if !more {
            break;
        }

        let values: Row = record.iter().map(str::to_owned).collect();
        if table.header.is_none() {
            table.header = Some(values);
        } else {
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            table.records.push(ParsedRecord { line, values });
        }
    }

    debug!(
        input = %input.name,
        position,
        records = table.records.len(),
        "parsed CSV input"
    );
    Ok(table)
}

/// Reads a single file fully into memory.
pub fn load_input(path: &Path) -> Result<TabularInput> {
    if !path.exists() {
        return Err(CombineError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(TabularInput::from_path_bytes(path, bytes))
}

/// Reads every file in order, failing on the first unreadable one.
pub fn load_inputs(paths: &[PathBuf]) -> Result<Vec<TabularInput>> {
    paths.iter().map(|path| load_input(path)).collect()
}
