//! CLI argument definitions for the prisoner-of-war record pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pow",
    version,
    about = "Prisoner-of-war records to linked data",
    long_about = "Convert prisoner-of-war records into a provenance-annotated RDF graph.\n\n\
                  Prunes personal information of recent records, splits datasets into\n\
                  public and restricted parts and links literal values to external entities."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include personal data (names, dates) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Pipeline configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a delimited input file into data, schema and error outputs.
    Convert(ConvertArgs),

    /// Remove personal and health information of recent records.
    Prune(PruneArgs),

    /// Split a dataset into public and restricted graphs.
    Partition(PartitionArgs),

    /// Link literal values to external resources.
    Link(LinkArgs),

    /// Turn literal provenance sources into source resources.
    Sources(SourcesArgs),

    /// List the columns of the mapping table.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Input file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: ./output).
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Column mapping table (TOML) replacing the built-in one.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Field delimiter of the input file.
    #[arg(long = "delimiter", value_enum)]
    pub delimiter: Option<DelimiterArg>,

    /// Header of the record identifier column.
    #[arg(long = "id-column", value_name = "HEADER")]
    pub id_column: Option<String>,

    /// Header of the name column (default: first non-identifier column).
    #[arg(long = "name-column", value_name = "HEADER")]
    pub name_column: Option<String>,

    /// Map and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PruneArgs {
    /// Data graph (N-Triples).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Pruned data graph (N-Triples).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Family name census (CSV with `family_name` and `count` columns).
    #[arg(long = "census", value_name = "PATH")]
    pub census: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PartitionArgs {
    /// Data graph (N-Triples).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Public part (N-Triples).
    #[arg(long = "public", value_name = "PATH")]
    pub public: PathBuf,

    /// Restricted part (N-Triples).
    #[arg(long = "restricted", value_name = "PATH")]
    pub restricted: PathBuf,
}

#[derive(Parser)]
pub struct LinkArgs {
    /// What to link.
    #[arg(value_enum)]
    pub task: LinkTaskArg,

    /// Data graph (N-Triples).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Graph of accepted links (N-Triples).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Candidate answers (JSON object from query string to candidate list).
    #[arg(long = "candidates", value_name = "PATH")]
    pub candidates: PathBuf,
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// Data graph (N-Triples).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Data graph with source resources (N-Triples).
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Source index (CSV with `Merkintä`, `Selitys` and `Sijainti` columns).
    #[arg(long = "index", value_name = "PATH")]
    pub index: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Column mapping table (TOML) replacing the built-in one.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LinkTaskArg {
    Ranks,
    Units,
    Camps,
    Occupations,
    Municipalities,
    Persons,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Comma,
    Tab,
    Semicolon,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
