//! Output generation for the prisoner-of-war pipeline.
//!
//! - **N-Triples**: data and schema graphs, with a matching reader
//! - **Error report**: CSV of per-record issues

mod error;
mod ntriples;
mod report;

use std::path::Path;

pub use error::{OutputError, Result};
pub use ntriples::{
    format_triple, parse_ntriples, read_ntriples_file, to_ntriples, write_ntriples,
    write_ntriples_file,
};
pub use report::{REPORT_HEADERS, write_error_report, write_error_report_file};

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
