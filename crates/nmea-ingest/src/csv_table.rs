//! CSV loading into an in-memory header-plus-rows table.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::cells::is_na;
use crate::error::SourceError;
use crate::source::RecordSource;

/// A table loaded from a CSV export: one header row followed by data rows.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Builds a table from in-memory values; rows are padded or cut to the
    /// header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let headers = headers.iter().map(|h| normalize_header(h)).collect();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row.iter().map(|value| normalize_cell(value)).collect()
            })
            .collect();
        Self { headers, rows }
    }
}

impl RecordSource for CsvTable {
    fn column_count(&self) -> usize {
        self.headers.len()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn header(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        let value = self.rows.get(row)?.get(column)?;
        if is_na(value) { None } else { Some(value) }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file whose first non-blank row holds the headers.
pub fn read_csv_table(path: &Path) -> Result<CsvTable, SourceError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    collect_table(reader, path)
}

/// Reads CSV text from any reader; `path` only labels errors.
pub fn read_csv_reader<R: Read>(reader: R, path: &Path) -> Result<CsvTable, SourceError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    collect_table(reader, path)
}

fn collect_table<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<CsvTable, SourceError> {
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let width = headers.len();
    let rows: Vec<Vec<String>> = rows
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();
    debug!(
        path = %path.display(),
        columns = width,
        rows = rows.len(),
        "loaded table"
    );
    Ok(CsvTable { headers, rows })
}
