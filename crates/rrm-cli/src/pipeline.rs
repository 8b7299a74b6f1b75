//! Merge pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read both CSV files and locate the key columns
//! 2. **Merge**: Join each report row against the rules table and stream the
//!    combined table to disk
//! 3. **Project**: Optionally re-encode the combined file as JSON
//!
//! Each stage takes the output of the previous stage and returns typed
//! results. Any failure terminates the run; nothing is retried.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use rrm_ingest::{column_index, read_csv_table};
use rrm_merge::{RowJoiner, duplicate_key_groups};
use rrm_model::{MergeOptions, Table};
use rrm_output::{CsvSink, merged_csv_path, project_to_json, projection_json_path};

use crate::types::{MergeRequest, MergeRunResult};

/// Result of the ingest stage: both tables with their key columns resolved.
#[derive(Debug)]
pub struct IngestResult {
    pub report: Table,
    pub rules: Table,
    pub report_key_index: usize,
    pub rules_key_index: usize,
}

/// Load both input tables and resolve the join key columns.
///
/// Both keys must be locatable before any row processing starts, so a
/// missing column fails the run here.
pub fn ingest(
    report_path: &Path,
    rules_path: &Path,
    options: &MergeOptions,
) -> Result<IngestResult> {
    let report = read_csv_table(report_path)
        .with_context(|| format!("read report {}", report_path.display()))?;
    let rules = read_csv_table(rules_path)
        .with_context(|| format!("read rules {}", rules_path.display()))?;
    let report_key_index = column_index(&report, &options.report_key_column, report_path)
        .context("locate report key column")?;
    let rules_key_index = column_index(&rules, &options.rules_key_column, rules_path)
        .context("locate rules key column")?;
    Ok(IngestResult {
        report,
        rules,
        report_key_index,
        rules_key_index,
    })
}

/// Counters accumulated while streaming combined rows.
#[derive(Debug, Default)]
pub struct MergeStats {
    pub matched: usize,
    pub unmatched: usize,
}

/// Join every report row against the rules table and stream the combined
/// table to `output_path`, header first.
pub fn merge(
    ingested: &IngestResult,
    options: &MergeOptions,
    output_path: &Path,
) -> Result<MergeStats> {
    let joiner = RowJoiner::new(
        &ingested.rules,
        ingested.report_key_index,
        ingested.rules_key_index,
        options,
    );
    let header = joiner.combined_header(&ingested.report.headers);
    let header_width = header.len();

    let mut sink = CsvSink::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    sink.write_row(&header).context("write combined header")?;
    let mut stats = MergeStats::default();
    for report_row in &ingested.report.rows {
        let joined = joiner.join(report_row, header_width);
        sink.write_row(&joined.fields).with_context(|| {
            format!("write combined row {}", stats.matched + stats.unmatched + 1)
        })?;
        if joined.matched {
            stats.matched += 1;
        } else {
            stats.unmatched += 1;
        }
    }
    sink.finish()
        .with_context(|| format!("flush {}", output_path.display()))?;
    Ok(stats)
}

/// Run the whole pipeline with the production join configuration.
pub fn run_merge(request: &MergeRequest) -> Result<MergeRunResult> {
    run_merge_with_options(request, &MergeOptions::default())
}

/// Run the whole pipeline with explicit join configuration.
pub fn run_merge_with_options(
    request: &MergeRequest,
    options: &MergeOptions,
) -> Result<MergeRunResult> {
    let ingest_span = info_span!(
        "ingest",
        report = %request.report.display(),
        rules = %request.rules.display()
    );
    let ingest_start = Instant::now();
    let ingested = ingest_span.in_scope(|| ingest(&request.report, &request.rules, options))?;
    info!(
        report_rows = ingested.report.rows.len(),
        rule_rows = ingested.rules.rows.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let duplicate_rule_keys =
        duplicate_key_groups(&ingested.rules, ingested.rules_key_index, options.skip_segment);
    if duplicate_rule_keys > 0 {
        warn!(
            groups = duplicate_rule_keys,
            "rules table contains equivalent rule hrefs, the earliest row of each group wins"
        );
    }

    let output_path = merged_csv_path(&request.report);
    let merge_span = info_span!("merge", output = %output_path.display());
    let merge_start = Instant::now();
    let stats = merge_span.in_scope(|| merge(&ingested, options, &output_path))?;
    info!(
        matched = stats.matched,
        unmatched = stats.unmatched,
        duration_ms = merge_start.elapsed().as_millis(),
        "merge complete"
    );

    let (json_path, json_records) = if request.json {
        let json_path = projection_json_path(&request.report);
        let project_span = info_span!("project", output = %json_path.display());
        let project_start = Instant::now();
        let records = project_span
            .in_scope(|| project_to_json(&output_path, &json_path))
            .with_context(|| format!("project {}", output_path.display()))?;
        info!(
            records,
            duration_ms = project_start.elapsed().as_millis(),
            "projection complete"
        );
        (Some(json_path), Some(records))
    } else {
        (None, None)
    };

    Ok(MergeRunResult {
        report_path: request.report.clone(),
        rules_path: request.rules.clone(),
        output_path,
        json_path,
        report_rows: ingested.report.rows.len(),
        matched: stats.matched,
        unmatched: stats.unmatched,
        json_records,
        duplicate_rule_keys,
    })
}
