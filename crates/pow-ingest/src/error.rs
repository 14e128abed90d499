//! Error types for record ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that make an input file unusable as a whole.
///
/// Per-row trouble (bad or repeated identifiers) is reported through the
/// table's error log instead.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited content.
    #[error("failed to parse {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File has no header row or no data rows.
    #[error("input file is empty: {path}")]
    EmptyInput { path: PathBuf },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// Unsupported UTF-16 input.
    #[error("unsupported encoding {encoding} in {path}; convert to UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
