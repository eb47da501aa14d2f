mod common;
use common::{HOUR, TS_2024_01_02_10H, cells, record, temp_path};
use gatelog_archiver::sink::{CsvFileBackend, RowRange, SheetBackend, SheetSink, Sink};
use gatelog_archiver::utils::Zone;
use std::fs;

const HEADER_LINE: &str = "Date,Time,Type,Status,Serial,User ID,Last Name,First Name";

#[test]
fn test_missing_file_reads_as_empty() {
    let path = temp_path("csv_missing", "csv");
    let backend = CsvFileBackend::new(&path);

    assert!(backend.read_rows(RowRange::new(2, 1)).unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_prepend_creates_file_with_header() {
    let path = temp_path("csv_prepend_create", "csv");
    let mut backend = CsvFileBackend::new(&path);

    backend
        .prepend_rows(&[cells([
            "2/1/2024", "10:00:00", "Dial", "Success", "SN1", "U1", "Doe", "Jane",
        ])])
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], HEADER_LINE);
    assert_eq!(lines[1], "2/1/2024,10:00:00,Dial,Success,SN1,U1,Doe,Jane");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_prepend_goes_above_existing_rows() {
    let path = temp_path("csv_prepend_above", "csv");
    fs::write(
        &path,
        format!("{HEADER_LINE}\n2/1/2024,09:00:00,Dial,Success,SN1,U1,Doe,Jane\n"),
    )
    .unwrap();
    let mut backend = CsvFileBackend::new(&path);

    backend
        .prepend_rows(&[
            cells(["2/1/2024", "11:00:00", "Dial", "Success", "SN1", "U2", "", ""]),
            cells(["2/1/2024", "10:00:00", "Dial", "Success", "SN1", "U3", "", ""]),
        ])
        .unwrap();

    let top = backend.read_rows(RowRange::new(2, 1)).unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0][1], "11:00:00");

    let content = fs::read_to_string(&path).unwrap();
    let times: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap())
        .collect();
    assert_eq!(times, vec!["11:00:00", "10:00:00", "09:00:00"]);
}

#[test]
fn test_insert_then_write() {
    let path = temp_path("csv_insert_write", "csv");
    fs::write(
        &path,
        format!("{HEADER_LINE}\n1/1/2024,08:00:00,Dial,Success,SN1,U1,Doe,Jane\n"),
    )
    .unwrap();
    let mut backend = CsvFileBackend::new(&path);
    let range = RowRange::new(2, 1);

    backend.insert_rows(range).unwrap();
    // Blank reserved row is not reported, like an empty sheet row.
    assert!(backend.read_rows(range).unwrap().is_empty());

    backend
        .write_rows(
            range,
            &[cells(["2/1/2024", "08:00:00", "Dial", "Success", "SN1", "U1", "Doe", "Jane"])],
        )
        .unwrap();

    let rows = backend.read_rows(RowRange::new(2, 2)).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "2/1/2024");
    assert_eq!(rows[1][0], "1/1/2024");
}

#[test]
fn test_write_rejects_rows_that_do_not_fit() {
    let path = temp_path("csv_write_overflow", "csv");
    let mut backend = CsvFileBackend::new(&path);
    let row = cells(["a", "b", "c", "d", "e", "f", "g", "h"]);

    assert!(
        backend
            .write_rows(RowRange::new(2, 1), &[row.clone(), row])
            .is_err()
    );
}

#[test]
fn test_sink_over_csv_archive_runs_idempotently() {
    let path = temp_path("csv_sink_runs", "csv");
    let mut sink = SheetSink::new(CsvFileBackend::new(&path), Zone::Utc);
    let batch = vec![
        record("U1", TS_2024_01_02_10H),
        record("U2", TS_2024_01_02_10H + HOUR),
        record("U3", TS_2024_01_02_10H - HOUR),
    ];

    assert_eq!(sink.receive(&batch).unwrap(), 3);
    assert_eq!(sink.receive(&batch).unwrap(), 0);

    let mut next = batch.clone();
    next.push(record("U4", TS_2024_01_02_10H + 2 * HOUR));
    assert_eq!(sink.receive(&next).unwrap(), 1);

    let content = fs::read_to_string(&path).unwrap();
    let users: Vec<&str> = content
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(5).unwrap())
        .collect();
    assert_eq!(users, vec!["U4", "U2", "U1", "U3"]);
}
