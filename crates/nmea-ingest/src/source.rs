//! Row/column access to a loaded table.

/// Read-only grid of header names and data cells.
///
/// Data rows are addressed from zero; the header row is not counted. Cells
/// that are empty or hold a spreadsheet NA marker read as `None`.
pub trait RecordSource {
    /// Number of columns in the header row.
    fn column_count(&self) -> usize;

    /// Number of data rows below the header.
    fn row_count(&self) -> usize;

    fn header(&self, column: usize) -> Option<&str>;

    fn cell(&self, row: usize, column: usize) -> Option<&str>;
}

/// Spreadsheet row number of a data row (the header is row 1).
pub fn sheet_row(row: usize) -> usize {
    row + 2
}
