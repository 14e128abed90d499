//! Core pipeline for prisoner-of-war records.
//!
//! - **row**: maps one source record to a graph fragment and its error log
//! - **assemble**: maps a whole input file and derives the schema graph
//! - **prune**: removes personal and health information of recent records
//! - **partition**: splits a dataset into public and restricted parts

pub mod assemble;
pub mod config;
pub mod partition;
pub mod prune;
pub mod row;
pub mod schema;

pub use assemble::{Dataset, assemble};
pub use config::{MappingOptions, PruneOptions};
pub use partition::{is_restricted, partition, record_triples};
pub use prune::{
    NameCensus, PLACEHOLDER_FAMILY_NAME, PLACEHOLDER_GIVEN_NAMES, PrivacyClass, PruneReport,
    cast_date, classify, dataset_family_names, prune,
};
pub use row::{RowMapper, date_term, value_term};
pub use schema::build_schema;
