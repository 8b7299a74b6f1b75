pub mod csv_table;

pub use csv_table::{column_index, read_csv_table};
