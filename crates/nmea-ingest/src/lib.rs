pub mod cells;
pub mod csv_table;
pub mod error;
pub mod source;

pub use cells::{is_na, is_truthy, parse_f64, parse_week};
pub use csv_table::{CsvTable, read_csv_reader, read_csv_table};
pub use error::SourceError;
pub use source::{RecordSource, sheet_row};
