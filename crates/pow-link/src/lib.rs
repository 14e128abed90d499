//! Entity resolution for prisoner-of-war records.
//!
//! - **oracle**: the external candidate search, with retry and file-backed implementations
//! - **candidate**: typing of loosely formatted oracle answers
//! - **source**: the comparable fields of a record
//! - **score**: additive candidate scoring and acceptance
//! - **preprocess**: literal normalization into query strings
//! - **linker**: the driver writing accepted links into a new graph
//! - **sources**: archival source resources for provenance statements

pub mod candidate;
pub mod error;
pub mod linker;
pub mod oracle;
pub mod preprocess;
pub mod score;
pub mod source;
pub mod sources;

pub use candidate::{Candidate, DateRange, RawCandidate, parse_candidates};
pub use error::{CandidateError, OracleError};
pub use linker::{
    FirstCandidate, LinkOutcome, LinkReport, LinkTask, Linker, MatchValidator, PersonValidator,
};
pub use oracle::{CandidateOracle, JsonOracle, OracleConfig, RetryingOracle};
pub use preprocess::Preprocess;
pub use score::{CandidateScore, CandidateScorer, ScoreComponent, ScoringConfig};
pub use source::SourcePerson;
pub use sources::{SourceEntry, SourceReport, link_sources, source_iri, source_slug};
