//! Error types for mapping operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Custom field index past the end of the list.
    #[error("custom field {index} does not exist ({len} defined)")]
    CustomFieldOutOfRange { index: usize, len: usize },

    /// Mapping profile could not be read.
    #[error("failed to read mapping profile {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping profile could not be written.
    #[error("failed to write mapping profile {path}: {source}")]
    ProfileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping profile is not valid JSON for a mapping.
    #[error("invalid mapping profile {path}: {source}")]
    ProfileFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MappingError>;
