#![deny(unsafe_code)]

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{ModelError, Result};
use crate::term::Iri;
use crate::vocab::DATA_NS;

/// The stable per-record serial number from the input's identifier column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(serial: u64) -> Self {
        Self(serial)
    }

    /// Parse an identifier cell. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidRecordId(value.to_string()))
    }

    pub fn serial(&self) -> u64 {
        self.0
    }

    /// Entity IRI for this record.
    pub fn entity(&self) -> Iri {
        DATA_NS.iri(&format!("prisoner_{}", self.0))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource node identifier derived from `(entity, attribute, index)`.
pub fn resource_iri(entity: &Iri, attribute: &Iri, index: usize) -> Iri {
    Iri::from_trusted(format!(
        "{}_{}_{}",
        entity.as_str(),
        attribute.local_name(),
        index
    ))
}

/// Why a reification node exists.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReificationReason {
    /// The n-th cited source of a value.
    Source(usize),
    /// The date range attached to a value.
    Dates,
}

impl fmt::Display for ReificationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(n) => write!(f, "source_{n}"),
            Self::Dates => f.write_str("dates"),
        }
    }
}

/// Digest-derived reification identifier.
///
/// Rendered as the first 16 bytes of a SHA-256 over the identifying parts, in
/// lowercase hex, so identifiers stay stable across runs and platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReificationId([u8; 16]);

impl ReificationId {
    pub fn derive(entity: &Iri, attribute: &Iri, index: usize, reason: &ReificationReason) -> Self {
        let index = index.to_string();
        let reason = reason.to_string();
        let mut hasher = Sha256::new();
        for part in [entity.as_str(), attribute.as_str(), index.as_str(), reason.as_str()] {
            hasher.update(part.as_bytes());
            hasher.update([0x1f]);
        }
        Self::from_first_16_bytes_of_sha256(hasher.finalize().into())
    }

    pub fn from_first_16_bytes_of_sha256(digest: [u8; 32]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        Self(out)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn iri(&self) -> Iri {
        DATA_NS.iri(&format!("reification_{}", self.to_hex()))
    }
}
