//! Integration tests for the merge pipeline.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use rrm_cli::pipeline::{run_merge, run_merge_with_options};
use rrm_cli::types::MergeRequest;
use rrm_model::MergeOptions;

const REPORT_CSV: &str = "\
Rule HREF,Severity
/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10,High
/orgs/1/sec_policy/active/rule_sets/9/sec_rules/99,Low
";

const RULES_CSV: &str = "\
rule_href,Title,ruleset_name,ruleset_href
/orgs/1/sec_policy/draft/rule_sets/5/sec_rules/10,Widget Rule,RS1,/orgs/1/sec_policy/draft/rule_sets/5
";

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn request(dir: &Path, json: bool) -> MergeRequest {
    MergeRequest {
        report: write_fixture(dir, "report.csv", REPORT_CSV),
        rules: write_fixture(dir, "rules.csv", RULES_CSV),
        json,
    }
}

#[test]
fn merges_matched_and_unmatched_rows() {
    let dir = tempdir().expect("create temp dir");
    let request = request(dir.path(), false);

    let result = run_merge(&request).expect("run merge");
    assert_eq!(result.report_rows, 2);
    assert_eq!(result.matched, 1);
    assert_eq!(result.unmatched, 1);
    assert_eq!(result.output_path, dir.path().join("report_plus.csv"));
    assert!(result.json_path.is_none());

    let combined = fs::read_to_string(&result.output_path).expect("read combined");
    assert_eq!(
        combined,
        "Rule HREF,Severity,Title\n\
         /orgs/1/sec_policy/active/rule_sets/5/sec_rules/10,High,Widget Rule\n\
         /orgs/1/sec_policy/active/rule_sets/9/sec_rules/99,Low,\n"
    );
}

#[test]
fn merge_is_idempotent() {
    let dir = tempdir().expect("create temp dir");
    let request = request(dir.path(), false);

    let first = run_merge(&request).expect("first run");
    let first_bytes = fs::read(&first.output_path).expect("read first output");
    let second = run_merge(&request).expect("second run");
    let second_bytes = fs::read(&second.output_path).expect("read second output");
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn json_flag_writes_projection() {
    let dir = tempdir().expect("create temp dir");
    let request = request(dir.path(), true);

    let result = run_merge(&request).expect("run merge");
    let json_path = result.json_path.expect("json path");
    assert_eq!(json_path, dir.path().join("report_plus.json"));
    assert_eq!(result.json_records, Some(2));

    let contents = fs::read_to_string(&json_path).expect("read json");
    let parsed: Vec<BTreeMap<String, String>> =
        serde_json::from_str(&contents).expect("parse json");
    assert_eq!(parsed.len(), result.report_rows);
    let keys: Vec<&str> = parsed[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Rule HREF", "Severity", "Title"]);
    assert_eq!(
        parsed[0].get("Title").map(String::as_str),
        Some("Widget Rule")
    );
    assert_eq!(parsed[1].get("Title").map(String::as_str), Some(""));
}

#[test]
fn duplicate_rule_hrefs_are_reported_not_fatal() {
    let dir = tempdir().expect("create temp dir");
    let rules = "\
rule_href,Title,ruleset_name,ruleset_href
/orgs/1/sec_policy/draft/rule_sets/5/sec_rules/10,Draft Copy,RS1,/x
/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10,Active Copy,RS1,/x
";
    let request = MergeRequest {
        report: write_fixture(dir.path(), "report.csv", REPORT_CSV),
        rules: write_fixture(dir.path(), "rules.csv", rules),
        json: false,
    };

    let result = run_merge(&request).expect("run merge");
    assert_eq!(result.duplicate_rule_keys, 1);

    // File order decides: the draft row comes first and wins.
    let combined = fs::read_to_string(&result.output_path).expect("read combined");
    assert!(combined.contains("High,Draft Copy"));
    assert!(!combined.contains("Active Copy"));
}

#[test]
fn missing_report_key_column_fails() {
    let dir = tempdir().expect("create temp dir");
    let request = MergeRequest {
        report: write_fixture(dir.path(), "report.csv", "Href,Severity\n/a,High\n"),
        rules: write_fixture(dir.path(), "rules.csv", RULES_CSV),
        json: false,
    };

    let error = run_merge(&request).expect_err("missing column");
    let chain = format!("{error:#}");
    assert!(chain.contains("Rule HREF"));
}

#[test]
fn missing_rules_file_fails() {
    let dir = tempdir().expect("create temp dir");
    let request = MergeRequest {
        report: write_fixture(dir.path(), "report.csv", REPORT_CSV),
        rules: dir.path().join("absent.csv"),
        json: false,
    };

    let error = run_merge(&request).expect_err("missing file");
    assert!(format!("{error:#}").contains("absent.csv"));
}

#[test]
fn json_projection_of_empty_report_fails() {
    let dir = tempdir().expect("create temp dir");
    let request = MergeRequest {
        report: write_fixture(dir.path(), "report.csv", "Rule HREF,Severity\n"),
        rules: write_fixture(dir.path(), "rules.csv", RULES_CSV),
        json: true,
    };

    // The combined CSV is written (header only), but the projection refuses
    // to encode a file without data rows.
    let error = run_merge(&request).expect_err("no data rows");
    assert!(format!("{error:#}").contains("no data rows"));
    assert!(dir.path().join("report_plus.csv").exists());
    assert!(!dir.path().join("report_plus.json").exists());
}

#[test]
fn custom_options_join_arbitrary_schemas() {
    let dir = tempdir().expect("create temp dir");
    let report = write_fixture(dir.path(), "findings.csv", "key,note\na/b/c,n1\n");
    let rules = write_fixture(dir.path(), "lookup.csv", "id,label,secret\na/x/c,L1,s\n");
    let request = MergeRequest {
        report,
        rules,
        json: false,
    };
    let options = MergeOptions {
        report_key_column: "key".to_string(),
        rules_key_column: "id".to_string(),
        excluded_columns: ["secret".to_string()].into_iter().collect(),
        skip_segment: 1,
    };

    let result = run_merge_with_options(&request, &options).expect("run merge");
    assert_eq!(result.matched, 1);
    let combined =
        fs::read_to_string(dir.path().join("findings_plus.csv")).expect("read combined");
    assert_eq!(combined, "key,note,label\na/b/c,n1,L1\n");
}
