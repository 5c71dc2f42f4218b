use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::combiner::error::Result;
use crate::combiner::model::CombinedTable;

/// Writes the header row followed by every row, comma separated, without an
/// index column.
pub fn write_table<W: Write>(writer: W, table: &CombinedTable) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serialises the whole table into an in-memory CSV document.
pub fn to_csv_bytes(table: &CombinedTable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, table)?;
    Ok(buffer)
}

/// Serialises only the first `rows` rows, for previews.
pub fn preview_bytes(table: &CombinedTable, rows: usize) -> Result<Vec<u8>> {
    to_csv_bytes(&table.head(rows))
}

/// Writes the table to `path`, replacing any existing file.
pub fn write_table_file(path: &Path, table: &CombinedTable) -> Result<()> {
    let file = File::create(path)?;
    write_table(file, table)
}
