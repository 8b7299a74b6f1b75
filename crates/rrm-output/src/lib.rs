//! Output generation for the rule report merge tool.
//!
//! - **CSV**: the combined table, streamed to disk row by row
//! - **JSON**: optional projection of the combined file as an array of
//!   header-keyed objects

pub mod csv_out;
pub mod json_out;
pub mod paths;

pub use csv_out::CsvSink;
pub use json_out::project_to_json;
pub use paths::{merged_csv_path, projection_json_path};
