use std::fs;

use csvmap_ingest::{IngestError, list_csv_files, read_csv_file};

#[test]
fn reads_file_into_headers_and_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.csv");
    fs::write(&path, "Name,Mail\nAnn,a@x.com\n").expect("write file");

    let table = read_csv_file(&path).expect("read csv");
    assert_eq!(table.headers, vec!["Name", "Mail"]);
    assert_eq!(table.rows, vec![vec!["Ann", "a@x.com"]]);
}

#[test]
fn rejects_non_csv_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("leads.txt");
    fs::write(&path, "Name\nAnn\n").expect("write file");

    let err = read_csv_file(&path).unwrap_err();
    assert!(matches!(err, IngestError::NotCsv { .. }));
}

#[test]
fn reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = read_csv_file(&dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn rejects_utf16_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("wide.csv");
    fs::write(&path, [0xFF, 0xFE, b'N', 0x00]).expect("write file");

    let err = read_csv_file(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
            ..
        }
    ));
}

#[test]
fn replaces_invalid_utf8_bytes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"Name\nJos\xe9\n").expect("write file");

    let table = read_csv_file(&path).expect("read csv");
    assert_eq!(table.rows[0], vec!["Jos\u{fffd}"]);
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").expect("write file");

    assert!(matches!(read_csv_file(&path), Err(IngestError::EmptyCsv)));
}

#[test]
fn lists_csv_files_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    for name in ["b.csv", "a.CSV", "notes.txt"] {
        fs::write(dir.path().join(name), "X\n").expect("write file");
    }
    fs::create_dir(dir.path().join("nested.csv")).expect("create dir");

    let files = list_csv_files(dir.path()).expect("list files");
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["a.CSV", "b.csv"]);
}

#[test]
fn listing_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = list_csv_files(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}
