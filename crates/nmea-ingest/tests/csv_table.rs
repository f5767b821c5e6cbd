use std::fs;
use std::io::Cursor;
use std::path::Path;

use nmea_ingest::{RecordSource, SourceError, read_csv_reader, read_csv_table};

#[test]
fn reads_header_and_rows_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("dr.csv");
    fs::write(
        &path,
        "Week #,Time of Week (sec GPS),Latitude (deg)\n2190,123456.0,37.5\n,,\n2190,123456.1,#N/A\n",
    )
    .expect("write csv");

    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.column_count(), 3);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.header(1), Some("Time of Week (sec GPS)"));
    assert_eq!(table.cell(0, 2), Some("37.5"));
    assert_eq!(table.cell(1, 1), Some("123456.1"));
    assert_eq!(table.cell(1, 2), None);
}

#[test]
fn short_rows_are_padded() {
    let csv = "A,B,C\n1\n4,5,6,7\n";
    let table = read_csv_reader(Cursor::new(csv), Path::new("inline.csv")).expect("read csv");
    assert_eq!(table.rows[0], vec!["1", "", ""]);
    assert_eq!(table.rows[1], vec!["4", "5", "6"]);
}

#[test]
fn empty_input_is_an_error() {
    let result = read_csv_reader(Cursor::new("\n\n"), Path::new("empty.csv"));
    assert!(matches!(result, Err(SourceError::Empty { .. })));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = read_csv_table(&dir.path().join("absent.csv"));
    let error = result.expect_err("missing file");
    assert!(matches!(error, SourceError::Csv { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
