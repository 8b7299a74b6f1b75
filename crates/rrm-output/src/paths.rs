use std::path::{Path, PathBuf};

const CSV_SUFFIX: &str = ".csv";

/// `report.csv` → `report_plus.csv`.
///
/// A path without the expected extension keeps its full name as the base.
pub fn merged_csv_path(report: &Path) -> PathBuf {
    with_suffix(report, "_plus.csv")
}

/// `report.csv` → `report_plus.json`.
pub fn projection_json_path(report: &Path) -> PathBuf {
    with_suffix(report, "_plus.json")
}

fn with_suffix(report: &Path, suffix: &str) -> PathBuf {
    let raw = report.as_os_str().to_string_lossy();
    let base = raw.strip_suffix(CSV_SUFFIX).unwrap_or(&raw);
    PathBuf::from(format!("{base}{suffix}"))
}
