//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CSV upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File does not carry a `.csv` extension.
    #[error("not a CSV file: {path}")]
    NotCsv { path: PathBuf },

    /// File uses an encoding we cannot decode as text.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// The tokenizer rejected the input.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// No rows at all, so there is no header row either.
    #[error("CSV data is empty: no header row found")]
    EmptyCsv,
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let message = match err.position() {
            Some(position) => format!("line {}: {err}", position.line()),
            None => err.to_string(),
        };
        Self::CsvParse { message }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/file.csv");

        let err = IngestError::NotCsv {
            path: PathBuf::from("leads.xlsx"),
        };
        assert_eq!(err.to_string(), "not a CSV file: leads.xlsx");
    }
}
