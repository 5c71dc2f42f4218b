use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::combiner::combine::{CombineOptions, combine_with};
use crate::combiner::error::Result;
use crate::combiner::io::{csv_read, csv_write};
use crate::combiner::model::CombinedTable;

/// File name offered for the combined download.
pub const DEFAULT_OUTPUT_NAME: &str = "combined_data.csv";
/// Number of rows shown in a preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
/// Media type of the combined artifact.
pub const CSV_MIME_TYPE: &str = "text/csv";
/// Shown alongside any failure caused by a file's structure.
pub const REMEDIATION_HINT: &str =
    "Please ensure all CSV files have the same structure as the first file.";

/// Outcome of a successful file-based combine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombineSummary {
    pub file_count: usize,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub output: PathBuf,
    pub mime_type: &'static str,
    /// The first rows of the combined table.
    pub preview: CombinedTable,
}

/// Combines the CSV files at `inputs` and writes the result to `output`.
///
/// Returns `Ok(None)` without touching `output` when `inputs` is empty. On
/// failure no output file is created.
#[instrument(
    level = "info",
    skip_all,
    fields(files = inputs.len(), output = %output.display())
)]
pub fn combine_files(
    inputs: &[PathBuf],
    output: &Path,
    options: &CombineOptions,
    preview_rows: usize,
) -> Result<Option<CombineSummary>> {
    let loaded = csv_read::load_inputs(inputs)?;
    debug!(
        bytes = loaded.iter().map(|input| input.bytes.len()).sum::<usize>(),
        "loaded inputs"
    );

    let Some(table) = combine_with(&loaded, options)? else {
        info!("no input files supplied");
        return Ok(None);
    };
    info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "combined inputs"
    );

    csv_write::write_table_file(output, &table)?;
    Ok(Some(CombineSummary {
        file_count: loaded.len(),
        row_count: table.row_count(),
        columns: table.columns().to_vec(),
        output: output.to_path_buf(),
        mime_type: CSV_MIME_TYPE,
        preview: table.head(preview_rows),
    }))
}
