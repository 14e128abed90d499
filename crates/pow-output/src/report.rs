//! Error report CSV.

use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tracing::debug;

use pow_model::ErrorLog;

use crate::error::{OutputError, Result};

/// Report columns, in order.
pub const REPORT_HEADERS: [&str; 5] = ["record_id", "name", "column", "message", "value"];

/// Write the log as CSV. The header row is written even for an empty log.
pub fn write_error_report<W: Write>(log: &ErrorLog, writer: W) -> csv::Result<()> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(REPORT_HEADERS)?;
    for record in log.iter() {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_error_report_file(path: &Path, log: &ErrorLog) -> Result<()> {
    crate::ensure_parent_dir(path)?;
    let file = std::fs::File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_error_report(log, file).map_err(|source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), records = log.len(), "wrote error report");
    Ok(())
}
