//! Error types for candidate lookup and parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a candidate oracle call.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle could not be reached or answered with an error.
    #[error("oracle request for {query:?} failed: {message}")]
    Request { query: String, message: String },

    /// All attempts failed.
    #[error("oracle gave up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<OracleError>,
    },

    /// Failed to read a candidate file.
    #[error("failed to read candidate file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Candidate file is not valid JSON of the expected shape.
    #[error("failed to parse candidate file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A candidate that cannot be used for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("candidate has no identifier")]
    MissingId,

    #[error("candidate identifier {0:?} is not an IRI")]
    InvalidId(String),

    /// Every structured field present on the candidate failed to parse.
    #[error("no field of candidate {id} could be parsed ({fields} tried)")]
    Unparseable { id: String, fields: usize },
}
