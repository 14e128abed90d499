use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid IRI: {0:?}")]
    InvalidIri(String),
    #[error("invalid literal {lexical:?} for datatype {datatype}")]
    InvalidLiteral { lexical: String, datatype: String },
    #[error("invalid record identifier: {0:?}")]
    InvalidRecordId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
