//! Header/row split of an uploaded CSV.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use csvmap_model::RawTable;

use crate::error::{IngestError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Parse raw CSV text into a header row and data rows.
///
/// The first record becomes the header row, every later record a data row.
/// Quoting and escaping follow RFC 4180 as implemented by the `csv` crate.
/// Rows keep their own width; nothing is padded or truncated.
pub fn parse_csv_text(text: &str) -> Result<RawTable> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Err(IngestError::EmptyCsv);
    };
    let rows: Vec<Vec<String>> = records.collect();
    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed csv text"
    );
    Ok(RawTable::new(headers, rows))
}

/// Read a `.csv` file from disk and parse it.
pub fn read_csv_file(path: &Path) -> Result<RawTable> {
    let text = read_csv_text(path)?;
    parse_csv_text(&text)
}

/// Read the file behind the upload boundary as text.
///
/// Only `.csv` files are accepted. UTF-16 input is rejected; other invalid
/// UTF-8 sequences are replaced with U+FFFD.
pub fn read_csv_text(path: &Path) -> Result<String> {
    if !has_csv_extension(path) {
        return Err(IngestError::NotCsv {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    validate_encoding(path, &bytes)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "file is not valid UTF-8, replacing invalid bytes");
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}

/// Case-insensitive `.csv` extension check.
pub fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn validate_encoding(path: &Path, bytes: &[u8]) -> Result<()> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding: "UTF-16 BE",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_header_from_rows() {
        let table = parse_csv_text("Name,Mail\nAnn,a@x.com\nBob,b@x.com\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Mail"]);
        assert_eq!(table.rows, vec![vec!["Ann", "a@x.com"], vec!["Bob", "b@x.com"]]);
    }

    #[test]
    fn keeps_quoted_commas_and_escaped_quotes() {
        let table = parse_csv_text("Company,Note\n\"Acme, Inc\",\"said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0], vec!["Acme, Inc", "said \"hi\""]);
    }

    #[test]
    fn ragged_rows_are_kept_as_is() {
        let table = parse_csv_text("A,B,C\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1"]);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn strips_utf8_bom_from_first_header() {
        let table = parse_csv_text("\u{feff}Name,Mail\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Mail"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(parse_csv_text(""), Err(IngestError::EmptyCsv)));
        assert!(matches!(parse_csv_text("\u{feff}"), Err(IngestError::EmptyCsv)));
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_csv_extension(Path::new("leads.CSV")));
        assert!(has_csv_extension(Path::new("dir/leads.csv")));
        assert!(!has_csv_extension(Path::new("leads.txt")));
        assert!(!has_csv_extension(Path::new("csv")));
    }
}
