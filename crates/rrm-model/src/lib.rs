pub mod error;
pub mod options;
pub mod table;

pub use error::{MergeError, Result};
pub use options::{
    MergeOptions, PVERSION_SEGMENT, REPORT_KEY_COLUMN, RESERVED_RULE_COLUMNS, RULES_KEY_COLUMN,
};
pub use table::{Table, cell};
