use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("column '{name}' not found in {}", .path.display())]
    ColumnNotFound { name: String, path: PathBuf },
    #[error("{}: file has no rows", .path.display())]
    EmptyTable { path: PathBuf },
    #[error("{}: no data rows to project", .path.display())]
    NoDataRows { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, MergeError>;
