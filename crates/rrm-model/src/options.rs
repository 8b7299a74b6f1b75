use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Report column holding the href of the rule that produced each finding.
pub const REPORT_KEY_COLUMN: &str = "Rule HREF";

/// Rules export column holding each rule's own href.
pub const RULES_KEY_COLUMN: &str = "rule_href";

/// Rule-set metadata columns that never survive into the combined table.
pub const RESERVED_RULE_COLUMNS: [&str; 2] = ["ruleset_name", "ruleset_href"];

/// Segment of a sec_policy href that carries the provisioning state
/// (`active` or `draft`), counting from zero with the empty segment before
/// the leading slash included.
pub const PVERSION_SEGMENT: usize = 4;

/// Join configuration.
///
/// `Default` carries the production schema; tests exercise the join against
/// arbitrary schemas by building their own options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Key column name in the report header (exact, case-sensitive).
    pub report_key_column: String,
    /// Key column name in the rules header (exact, case-sensitive).
    pub rules_key_column: String,
    /// Rules columns dropped from the combined table, by header name.
    pub excluded_columns: BTreeSet<String>,
    /// Href segment ignored when comparing keys.
    pub skip_segment: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            report_key_column: REPORT_KEY_COLUMN.to_string(),
            rules_key_column: RULES_KEY_COLUMN.to_string(),
            excluded_columns: RESERVED_RULE_COLUMNS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            skip_segment: PVERSION_SEGMENT,
        }
    }
}
