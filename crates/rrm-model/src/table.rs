use serde::{Deserialize, Serialize};

/// A delimited file held fully in memory, header separated from data rows.
///
/// Values are kept byte-for-byte as parsed. Rows may be ragged; nothing here
/// enforces a width, callers index cells through [`cell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of columns in the header row.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

/// Cell at `index`, empty when the row is too short.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}
