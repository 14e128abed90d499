//! Prisoner record ingestion.
//!
//! Reads a delimited file with a header row into [`SourceTable`]: one
//! [`SourceRecord`] per data row, keyed by the serial number found in the
//! identifier column, with the free-text name column split out. Rows whose
//! identifier is missing, malformed or repeated are skipped and reported in
//! the table's error log.

mod error;
mod table;

pub use error::{IngestError, Result};
pub use table::{
    Delimiter, IngestOptions, SourceRecord, SourceTable, read_source_table, read_source_table_from,
};
