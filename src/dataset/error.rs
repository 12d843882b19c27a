//! Dataset error types
//!
//! Errors raised while loading the source file. All of them are fatal at startup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// File could not be opened or read
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Delimited data could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the dashboard depends on is not in the header
    #[error("Missing required column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// Delimiter is not a single byte
    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(String),
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
