use std::path::PathBuf;

/// Parameters for one merge run.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Path to the report CSV file.
    pub report: PathBuf,
    /// Path to the rules CSV file.
    pub rules: PathBuf,
    /// Also write a JSON projection of the combined output.
    pub json: bool,
}

/// Outcome of a merge run, consumed by the summary printer.
#[derive(Debug)]
pub struct MergeRunResult {
    pub report_path: PathBuf,
    pub rules_path: PathBuf,
    pub output_path: PathBuf,
    pub json_path: Option<PathBuf>,
    /// Data rows in the report (one combined row each).
    pub report_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub json_records: Option<usize>,
    /// Groups of equivalent rule hrefs found in the rules table.
    pub duplicate_rule_keys: usize,
}
