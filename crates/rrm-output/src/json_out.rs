use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use rrm_model::{MergeError, Result};

/// Re-encode the combined CSV as a pretty-printed JSON array of objects, one
/// object per data row keyed by header name.
///
/// The file is re-read with a flexible reader: rows shorter than the header
/// are padded with empty string values, fields beyond the header width are
/// dropped. Object keys come out sorted. Fails without writing anything when
/// the file has no data rows. Returns the number of records written.
pub fn project_to_json(csv_path: &Path, json_path: &Path) -> Result<usize> {
    let file = File::open(csv_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<String>>());
    }
    if records.len() < 2 {
        return Err(MergeError::NoDataRows {
            path: csv_path.to_path_buf(),
        });
    }

    let headers = &records[0];
    let mut objects: Vec<BTreeMap<&str, &str>> = Vec::with_capacity(records.len() - 1);
    for row in &records[1..] {
        let mut object = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            let value = row.get(index).map(String::as_str).unwrap_or("");
            object.insert(header.as_str(), value);
        }
        objects.push(object);
    }

    let json = serde_json::to_string_pretty(&objects)?;
    std::fs::write(json_path, format!("{json}\n"))?;
    debug!(
        path = %json_path.display(),
        records = objects.len(),
        "json projection written"
    );
    Ok(objects.len())
}
