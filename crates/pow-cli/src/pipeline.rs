//! Pipeline stages shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, info_span};

use pow_core::{Dataset, NameCensus, assemble};
use pow_ingest::{IngestOptions, read_source_table};
use pow_link::{
    CandidateScorer, JsonOracle, LinkOutcome, LinkTask, Linker, OracleConfig, RetryingOracle,
    ScoringConfig, SourceEntry,
};
use pow_map::{MappingTable, prisoner_mapping};
use pow_model::{ErrorLog, Graph, Iri};
use pow_output::{read_ntriples_file, write_error_report_file, write_ntriples_file};

use crate::config::PipelineConfig;
use crate::logging::redact_value;

/// Output file names inside the output directory.
pub const DATA_FILE: &str = "prisoners.nt";
pub const SCHEMA_FILE: &str = "schema.nt";
pub const ERRORS_FILE: &str = "errors.csv";

/// Files written for a converted dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub data: PathBuf,
    pub schema: PathBuf,
    pub errors: PathBuf,
}

/// What a linking run resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Literal values, one task per attribute.
    Literals(Vec<LinkTask>),
    /// Whole records, scored field by field.
    Persons,
}

/// The mapping table at `path`, or the built-in one.
pub fn load_mapping(path: Option<&Path>) -> Result<MappingTable> {
    match path {
        Some(path) => {
            MappingTable::load(path).with_context(|| format!("load mapping table {}", path.display()))
        }
        None => prisoner_mapping().context("build built-in mapping table"),
    }
}

/// Read and map one input file.
pub fn convert(
    input: &Path,
    table: &MappingTable,
    ingest: &IngestOptions,
    config: &PipelineConfig,
) -> Result<Dataset> {
    let span = info_span!("convert", input = %input.display());
    let _guard = span.enter();

    let source = read_source_table(input, ingest)
        .with_context(|| format!("read input {}", input.display()))?;
    info!(records = source.len(), columns = source.headers.len(), "input read");

    let dataset = assemble(&source, table, &config.mapping);
    log_errors(&dataset.errors);
    Ok(dataset)
}

fn log_errors(errors: &ErrorLog) {
    for record in errors.iter() {
        debug!(
            record = %record.record_id,
            name = redact_value(&record.name),
            column = %record.column,
            value = redact_value(&record.value),
            "{}",
            record.message
        );
    }
}

/// Write the data graph, schema graph and error report into `dir`.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> Result<OutputPaths> {
    let paths = OutputPaths {
        data: dir.join(DATA_FILE),
        schema: dir.join(SCHEMA_FILE),
        errors: dir.join(ERRORS_FILE),
    };
    write_ntriples_file(&paths.data, &dataset.data).context("write data graph")?;
    write_ntriples_file(&paths.schema, &dataset.schema).context("write schema graph")?;
    write_error_report_file(&paths.errors, &dataset.errors).context("write error report")?;
    info!(dir = %dir.display(), "outputs written");
    Ok(paths)
}

pub fn read_graph(path: &Path) -> Result<Graph> {
    read_ntriples_file(path).with_context(|| format!("read graph {}", path.display()))
}

pub fn write_graph(path: &Path, graph: &Graph) -> Result<()> {
    write_ntriples_file(path, graph).with_context(|| format!("write graph {}", path.display()))
}

#[derive(Deserialize)]
struct CensusRow {
    family_name: String,
    count: u64,
}

/// Family name census from a CSV file with `family_name` and `count`
/// columns. Without a file no name counts as common.
pub fn load_census(path: Option<&Path>) -> Result<NameCensus> {
    let Some(path) = path else {
        return Ok(NameCensus::new());
    };
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("open census {}", path.display()))?;
    let mut census = NameCensus::new();
    for (index, row) in reader.deserialize::<CensusRow>().enumerate() {
        let row =
            row.with_context(|| format!("census {} row {}", path.display(), index + 2))?;
        census.insert(row.family_name.trim(), row.count);
    }
    info!(names = census.len(), "census loaded");
    Ok(census)
}

/// Source index rows from a CSV file; rows without a label are skipped.
pub fn load_source_index(path: Option<&Path>) -> Result<Vec<SourceEntry>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open source index {}", path.display()))?;
    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<SourceEntry>().enumerate() {
        let row = row
            .with_context(|| format!("source index {} row {}", path.display(), index + 2))?;
        if !row.label.trim().is_empty() {
            entries.push(row);
        }
    }
    info!(sources = entries.len(), "source index loaded");
    Ok(entries)
}

/// Resolve `target` in `graph` against candidates read from a JSON file.
pub fn link(
    graph: &Graph,
    target: &LinkTarget,
    candidates: &Path,
    record_class: &Iri,
    scoring: &ScoringConfig,
    oracle: OracleConfig,
) -> Result<LinkOutcome> {
    let answers = JsonOracle::load(candidates)
        .with_context(|| format!("load candidates {}", candidates.display()))?;
    let linker = Linker::new(RetryingOracle::new(answers, oracle));
    let outcome = match target {
        LinkTarget::Literals(tasks) => linker.link_all(graph, tasks, None),
        LinkTarget::Persons => {
            linker.link_persons(graph, record_class, &CandidateScorer::new(scoring.clone()))
        }
    };
    Ok(outcome)
}
