use std::path::PathBuf;

use pow_core::PruneReport;
use pow_link::{LinkReport, SourceReport};
use pow_cli::pipeline::OutputPaths;
use pow_model::ErrorLog;

#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    pub records: usize,
    pub data_triples: usize,
    pub schema_triples: usize,
    pub errors: ErrorLog,
    /// `None` for a dry run.
    pub outputs: Option<OutputPaths>,
}

#[derive(Debug)]
pub struct PruneResult {
    pub output: PathBuf,
    pub census_names: usize,
    pub report: PruneReport,
    pub triples: usize,
}

#[derive(Debug)]
pub struct PartitionResult {
    pub public: PathBuf,
    pub restricted: PathBuf,
    pub public_triples: usize,
    pub restricted_triples: usize,
}

#[derive(Debug)]
pub struct LinkResult {
    pub task: String,
    pub output: PathBuf,
    pub report: LinkReport,
}

#[derive(Debug)]
pub struct SourcesResult {
    pub output: PathBuf,
    pub indexed: usize,
    pub report: SourceReport,
    pub triples: usize,
}
