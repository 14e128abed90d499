use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingTableError {
    #[error("failed to read mapping table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse mapping table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("mapping table declares column {0:?} more than once")]
    DuplicateColumn(String),
    #[error("column {column:?} maps to an invalid attribute: {source}")]
    InvalidAttribute {
        column: String,
        #[source]
        source: pow_model::ModelError,
    },
    #[error("mapping table is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, MappingTableError>;
