use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use rrm_model::{MergeError, Result, Table};

/// Read a whole delimited file into a [`Table`].
///
/// The reader is flexible: ragged rows are kept as-is and widths are never
/// validated. Cell values are not trimmed or otherwise normalized, so merge
/// output stays faithful to the input bytes. A file that yields no records at
/// all is an error; the first record becomes the header.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }
    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Err(MergeError::EmptyTable {
            path: path.to_path_buf(),
        });
    };
    let rows: Vec<Vec<String>> = records.collect();
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "table loaded"
    );
    Ok(Table::new(headers, rows))
}

/// Zero-based index of the first header cell exactly equal to `name`.
///
/// Comparison is case-sensitive; both join keys must resolve before any row
/// processing starts, so a miss is fatal for the run.
pub fn column_index(table: &Table, name: &str, path: &Path) -> Result<usize> {
    table
        .headers
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| MergeError::ColumnNotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}
