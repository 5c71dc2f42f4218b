//! Combination of several CSV inputs into one table.
//!
//! The first input's header row fixes the column names. Every later input has
//! its first row dropped, whatever it says, and its remaining rows mapped onto
//! those columns by position. Column `i` of a later file is always taken to be
//! column `i` of the first; a file whose columns are in a different order is
//! combined misaligned. [`NameCheck::Strict`] turns that case into an error.

use tracing::{debug, warn};

use crate::combiner::error::{CombineError, Result};
use crate::combiner::io::csv_read::{self, ParsedRecord};
use crate::combiner::model::{CombinedTable, Row, TabularInput};

/// How a later input's first row is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameCheck {
    /// Discarded unconditionally.
    #[default]
    Positional,
    /// Must match the first input's header, ignoring surrounding whitespace
    /// and ASCII case, before being discarded.
    Strict,
}

/// Parameters of a combine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineOptions {
    pub delimiter: u8,
    pub name_check: NameCheck,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            name_check: NameCheck::Positional,
        }
    }
}

/// Combines `inputs` with the default options.
///
/// Returns `Ok(None)` when there is nothing to combine.
pub fn combine(inputs: &[TabularInput]) -> Result<Option<CombinedTable>> {
    combine_with(inputs, &CombineOptions::default())
}

/// Combines `inputs` in order. Any malformed input or mis-sized row aborts the
/// whole operation; no partial table is returned.
pub fn combine_with(
    inputs: &[TabularInput],
    options: &CombineOptions,
) -> Result<Option<CombinedTable>> {
    let Some((first, rest)) = inputs.split_first() else {
        return Ok(None);
    };

    let parsed = csv_read::read_table(first, 1, options.delimiter)?;
    let columns = parsed.header.ok_or_else(|| CombineError::SchemaUnavailable {
        name: first.name.clone(),
    })?;
    let rows = conform_rows(first, 1, columns.len(), parsed.records)?;
    debug!(
        input = %first.name,
        columns = columns.len(),
        rows = rows.len(),
        "established column schema"
    );
    let mut table = CombinedTable::new(columns, rows);

    for (index, input) in rest.iter().enumerate() {
        let position = index + 2;
        let parsed = csv_read::read_table(input, position, options.delimiter)?;
        if options.name_check == NameCheck::Strict {
            if let Some(header) = &parsed.header {
                check_names(input, position, table.columns(), header)?;
            }
        }
        let rows = conform_rows(input, position, table.column_count(), parsed.records)?;
        debug!(input = %input.name, position, rows = rows.len(), "appending rows");
        table.extend_rows(rows);
    }

    Ok(Some(table))
}

fn conform_rows(
    input: &TabularInput,
    position: usize,
    expected: usize,
    records: Vec<ParsedRecord>,
) -> Result<Vec<Row>> {
    records
        .into_iter()
        .map(|record| {
            if record.values.len() == expected {
                Ok(record.values)
            } else {
                Err(CombineError::ColumnCountMismatch {
                    name: input.name.clone(),
                    position,
                    line: record.line,
                    expected,
                    found: record.values.len(),
                })
            }
        })
        .collect()
}

fn check_names(
    input: &TabularInput,
    position: usize,
    expected: &[String],
    found: &[String],
) -> Result<()> {
    let same = expected.len() == found.len()
        && expected
            .iter()
            .zip(found)
            .all(|(lhs, rhs)| lhs.trim().eq_ignore_ascii_case(rhs.trim()));
    if same {
        return Ok(());
    }
    warn!(input = %input.name, position, "header differs from first file");
    Err(CombineError::ColumnNameMismatch {
        name: input.name.clone(),
        position,
        expected: expected.to_vec(),
        found: found.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combiner::io::csv_write;

    fn file(name: &str, text: &str) -> TabularInput {
        TabularInput::new(name, text)
    }

    fn file_a() -> TabularInput {
        file("a.csv", "a,b\n1,2\n3,4\n")
    }

    fn rows(table: &CombinedTable) -> Vec<Vec<&str>> {
        table
            .rows()
            .iter()
            .map(|row| row.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn no_inputs_is_not_an_error() {
        assert_eq!(combine(&[]).expect("no error"), None);
    }

    #[test]
    fn single_file_is_returned_as_parsed() {
        let table = combine(&[file_a()]).expect("combined").expect("table");
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(rows(&table), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn single_file_reserialises_to_its_own_content() {
        let text = "id,name,comment\n1,Ann,\"likes, commas\"\n2,Bob,\n";
        let table = combine(&[file("one.csv", text)])
            .expect("combined")
            .expect("table");
        let bytes = csv_write::to_csv_bytes(&table).expect("serialised");
        assert_eq!(String::from_utf8(bytes).expect("utf-8"), text);
    }

    #[test]
    fn later_headers_are_ignored() {
        let b = file("b.csv", "x,y\n5,6\n7,8\n");
        let table = combine(&[file_a(), b]).expect("combined").expect("table");
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(
            rows(&table),
            vec![vec!["1", "2"], vec!["3", "4"], vec!["5", "6"], vec!["7", "8"]]
        );
    }

    #[test]
    fn first_row_of_later_files_is_dropped_even_when_it_is_data() {
        let b = file("b.csv", "5,6\n7,8\n");
        let table = combine(&[file_a(), b]).expect("combined").expect("table");
        assert_eq!(rows(&table)[2..], [vec!["7", "8"]]);
    }

    #[test]
    fn row_count_sums_later_files_minus_their_first_row() {
        let inputs = vec![
            file_a(),
            file("b.csv", "h1,h2\n5,6\n"),
            file("c.csv", "h1,h2\n7,8\n9,10\n11,12\n"),
            file("d.csv", "h1,h2\n"),
        ];
        let table = combine(&inputs).expect("combined").expect("table");
        assert_eq!(table.row_count(), 2 + 1 + 3 + 0);
    }

    #[test]
    fn rows_follow_upload_order() {
        let inputs = vec![
            file("first.csv", "n\n1\n2\n"),
            file("second.csv", "n\n3\n4\n"),
            file("third.csv", "n\n5\n"),
        ];
        let table = combine(&inputs).expect("combined").expect("table");
        let values: Vec<&str> = table.rows().iter().map(|row| row[0].as_str()).collect();
        assert_eq!(values, ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn short_row_in_later_file_names_that_file() {
        let c = file("c.csv", "a,b\n9\n");
        let error = combine(&[file_a(), c]).expect_err("mismatch");
        match error {
            CombineError::ColumnCountMismatch {
                name,
                position,
                line,
                expected,
                found,
            } => {
                assert_eq!(name, "c.csv");
                assert_eq!(position, 2);
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wide_row_in_first_file_is_rejected() {
        let error = combine(&[file("a.csv", "a,b\n1,2,3\n")]).expect_err("mismatch");
        assert!(matches!(
            error,
            CombineError::ColumnCountMismatch { position: 1, found: 3, .. }
        ));
    }

    #[test]
    fn header_only_first_file_still_defines_columns() {
        let a = file("a.csv", "a,b\n");
        let b = file("b.csv", "x,y\n5,6\n7,8\n");
        let table = combine(&[a, b]).expect("combined").expect("table");
        assert_eq!(table.columns(), ["a", "b"]);
        assert_eq!(rows(&table), vec![vec!["5", "6"], vec!["7", "8"]]);
    }

    #[test]
    fn empty_first_file_has_no_schema() {
        let error = combine(&[file("empty.csv", ""), file_a()]).expect_err("no schema");
        assert!(matches!(
            error,
            CombineError::SchemaUnavailable { ref name } if name == "empty.csv"
        ));
        assert!(error.is_schema_mismatch());
    }

    #[test]
    fn empty_later_file_contributes_nothing() {
        let table = combine(&[file_a(), file("blank.csv", "")])
            .expect("combined")
            .expect("table");
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn malformed_later_file_aborts() {
        let bad = TabularInput::new("bad.csv", vec![b'x', b',', b'y', b'\n', 0xc3, b',', b'1', b'\n']);
        let error = combine(&[file_a(), bad]).expect_err("malformed");
        assert!(matches!(
            error,
            CombineError::MalformedTable { position: 2, .. }
        ));
    }

    #[test]
    fn strict_mode_accepts_case_and_whitespace_differences() {
        let options = CombineOptions {
            name_check: NameCheck::Strict,
            ..CombineOptions::default()
        };
        let b = file("b.csv", " A , B\n5,6\n");
        let table = combine_with(&[file_a(), b], &options)
            .expect("combined")
            .expect("table");
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn strict_mode_rejects_reordered_columns() {
        let options = CombineOptions {
            name_check: NameCheck::Strict,
            ..CombineOptions::default()
        };
        let b = file("b.csv", "b,a\n6,5\n");
        let error = combine_with(&[file_a(), b], &options).expect_err("names differ");
        assert!(matches!(
            error,
            CombineError::ColumnNameMismatch { position: 2, .. }
        ));
    }

    #[test]
    fn positional_mode_combines_reordered_columns_as_is() {
        let b = file("b.csv", "b,a\n6,5\n");
        let table = combine(&[file_a(), b]).expect("combined").expect("table");
        assert_eq!(rows(&table)[2], ["6", "5"]);
    }

    #[test]
    fn tab_delimited_inputs() {
        let options = CombineOptions {
            delimiter: b'\t',
            ..CombineOptions::default()
        };
        let a = file("a.tsv", "a\tb\n1\t2\n");
        let b = file("b.tsv", "a\tb\n3\t4\n");
        let table = combine_with(&[a, b], &options)
            .expect("combined")
            .expect("table");
        assert_eq!(rows(&table), vec![vec!["1", "2"], vec!["3", "4"]]);
    }
}
