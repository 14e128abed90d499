use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing or reading output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create, write or read a file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the error report.
    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Malformed N-Triples input.
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;
