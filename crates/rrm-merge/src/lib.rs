pub mod combine;
pub mod href;

pub use combine::{JoinedRow, RowJoiner, RuleColumnFilter};
pub use href::{duplicate_key_groups, hrefs_match};
