use std::collections::BTreeSet;

use rrm_model::{MergeOptions, Table, cell};

use crate::href::hrefs_match;

/// Predicate selecting which rules columns survive into the combined table.
///
/// Column `i` is dropped when it is the key column itself or its header name
/// is excluded. The header row and every data row go through the same
/// predicate, which keeps the combined header aligned with combined data
/// rows. The name test is positional: a data row longer than the header keeps
/// its surplus cells.
#[derive(Debug, Clone)]
pub struct RuleColumnFilter<'a> {
    headers: &'a [String],
    key_index: usize,
    excluded: &'a BTreeSet<String>,
}

impl<'a> RuleColumnFilter<'a> {
    pub fn new(headers: &'a [String], key_index: usize, excluded: &'a BTreeSet<String>) -> Self {
        Self {
            headers,
            key_index,
            excluded,
        }
    }

    fn keep(&self, index: usize) -> bool {
        index != self.key_index
            && self
                .headers
                .get(index)
                .map(|name| !self.excluded.contains(name))
                .unwrap_or(true)
    }

    /// Filtered copy of `row` (header or data row).
    pub fn filter_row(&self, row: &[String]) -> Vec<String> {
        row.iter()
            .enumerate()
            .filter(|(index, _)| self.keep(*index))
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Filtered rules header.
    pub fn filtered_headers(&self) -> Vec<String> {
        self.filter_row(self.headers)
    }
}

/// One combined row: report fields followed by filtered rule fields (or
/// empty-string padding when no rule matched).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub fields: Vec<String>,
    pub matched: bool,
}

/// Joins report rows against the rules table, first match wins.
pub struct RowJoiner<'a> {
    rules: &'a Table,
    report_key_index: usize,
    rules_key_index: usize,
    skip_segment: usize,
    filter: RuleColumnFilter<'a>,
}

impl<'a> RowJoiner<'a> {
    pub fn new(
        rules: &'a Table,
        report_key_index: usize,
        rules_key_index: usize,
        options: &'a MergeOptions,
    ) -> Self {
        let filter = RuleColumnFilter::new(&rules.headers, rules_key_index, &options.excluded_columns);
        Self {
            rules,
            report_key_index,
            rules_key_index,
            skip_segment: options.skip_segment,
            filter,
        }
    }

    /// Report header followed by the filtered rules header.
    pub fn combined_header(&self, report_headers: &[String]) -> Vec<String> {
        let mut header = report_headers.to_vec();
        header.extend(self.filter.filtered_headers());
        header
    }

    /// Join a single report row.
    ///
    /// Scans the rules rows in file order and stops at the first key match.
    /// The report fields are always the prefix of the result. Unmatched rows
    /// are padded with empty fields up to `header_width`, so the total field
    /// count equals the header width even when the report row is ragged.
    pub fn join(&self, report_row: &[String], header_width: usize) -> JoinedRow {
        let key = cell(report_row, self.report_key_index);
        let matched_rule = self.rules.rows.iter().find(|rule_row| {
            hrefs_match(key, cell(rule_row, self.rules_key_index), self.skip_segment)
        });
        let mut fields = report_row.to_vec();
        match matched_rule {
            Some(rule_row) => {
                fields.extend(self.filter.filter_row(rule_row));
                JoinedRow {
                    fields,
                    matched: true,
                }
            }
            None => {
                let padding = header_width.saturating_sub(report_row.len());
                fields.extend(std::iter::repeat_n(String::new(), padding));
                JoinedRow {
                    fields,
                    matched: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MergeOptions {
        MergeOptions::default()
    }

    fn rules_table() -> Table {
        Table::new(
            vec![
                "rule_href".to_string(),
                "Title".to_string(),
                "ruleset_name".to_string(),
                "ruleset_href".to_string(),
                "Notes".to_string(),
            ],
            vec![vec![
                "/orgs/1/sec_policy/draft/rule_sets/5/sec_rules/10".to_string(),
                "Widget Rule".to_string(),
                "RS1".to_string(),
                "/orgs/1/sec_policy/draft/rule_sets/5".to_string(),
                "reviewed".to_string(),
            ]],
        )
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn filter_drops_key_and_reserved_columns() {
        let opts = options();
        let rules = rules_table();
        let filter = RuleColumnFilter::new(&rules.headers, 0, &opts.excluded_columns);
        assert_eq!(filter.filtered_headers(), strings(&["Title", "Notes"]));
        assert_eq!(
            filter.filter_row(&rules.rows[0]),
            strings(&["Widget Rule", "reviewed"])
        );
    }

    #[test]
    fn filter_keeps_surplus_cells_of_long_rows() {
        let opts = options();
        let rules = rules_table();
        let filter = RuleColumnFilter::new(&rules.headers, 0, &opts.excluded_columns);
        let mut long_row = rules.rows[0].clone();
        long_row.push("surplus".to_string());
        assert_eq!(
            filter.filter_row(&long_row),
            strings(&["Widget Rule", "reviewed", "surplus"])
        );
    }

    #[test]
    fn combined_header_is_report_plus_filtered_rules() {
        let opts = options();
        let rules = rules_table();
        let joiner = RowJoiner::new(&rules, 0, 0, &opts);
        let report_headers = strings(&["Rule HREF", "Severity"]);
        let header = joiner.combined_header(&report_headers);
        assert_eq!(
            header,
            strings(&["Rule HREF", "Severity", "Title", "Notes"])
        );
        // Width property holds for any rules header content.
        assert_eq!(header.len(), report_headers.len() + 2);
    }

    #[test]
    fn matched_row_appends_filtered_rule_fields() {
        let opts = options();
        let rules = rules_table();
        let joiner = RowJoiner::new(&rules, 0, 0, &opts);
        let report_row = strings(&[
            "/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10",
            "High",
        ]);
        let joined = joiner.join(&report_row, 4);
        assert!(joined.matched);
        assert_eq!(
            joined.fields,
            strings(&[
                "/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10",
                "High",
                "Widget Rule",
                "reviewed",
            ])
        );
    }

    #[test]
    fn unmatched_row_pads_to_header_width() {
        let opts = options();
        let rules = rules_table();
        let joiner = RowJoiner::new(&rules, 0, 0, &opts);
        let report_row = strings(&[
            "/orgs/9/sec_policy/active/rule_sets/9/sec_rules/99",
            "Low",
        ]);
        let joined = joiner.join(&report_row, 4);
        assert!(!joined.matched);
        assert_eq!(joined.fields, strings(&[
            "/orgs/9/sec_policy/active/rule_sets/9/sec_rules/99",
            "Low",
            "",
            "",
        ]));
    }

    #[test]
    fn ragged_unmatched_row_pads_by_header_width_difference() {
        let opts = options();
        let rules = rules_table();
        let joiner = RowJoiner::new(&rules, 0, 0, &opts);
        // One field instead of two: the padding compensates for header
        // width, not for the missing report field.
        let report_row = strings(&["/orgs/9/sec_policy/active/rule_sets/9/sec_rules/99"]);
        let joined = joiner.join(&report_row, 4);
        assert_eq!(joined.fields.len(), 4);
        assert_eq!(joined.fields[1], "");
    }

    #[test]
    fn first_matching_rule_wins() {
        let opts = options();
        let mut rules = rules_table();
        let mut second = rules.rows[0].clone();
        second[0] = "/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10".to_string();
        second[1] = "Shadowed Rule".to_string();
        rules.rows.push(second);
        let joiner = RowJoiner::new(&rules, 0, 0, &opts);
        let report_row = strings(&[
            "/orgs/1/sec_policy/active/rule_sets/5/sec_rules/10",
            "High",
        ]);
        let joined = joiner.join(&report_row, 4);
        assert_eq!(joined.fields[2], "Widget Rule");
    }

    #[test]
    fn report_row_with_missing_key_cell_goes_unmatched() {
        let opts = options();
        let rules = rules_table();
        // Key column is index 1 but the row only has one field.
        let joiner = RowJoiner::new(&rules, 1, 0, &opts);
        let joined = joiner.join(&strings(&["only-field"]), 4);
        assert!(!joined.matched);
        assert_eq!(joined.fields.len(), 4);
    }
}
