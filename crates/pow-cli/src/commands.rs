use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use pow_cli::config::PipelineConfig;
use pow_cli::pipeline::{
    LinkTarget, convert, link, load_census, load_mapping, load_source_index, read_graph,
    write_dataset, write_graph,
};
use pow_core::{partition, prune};
use pow_ingest::{Delimiter, IngestOptions};
use pow_link::{LinkTask, link_sources};
use pow_transform::Separator;

use crate::cli::{
    ColumnsArgs, ConvertArgs, DelimiterArg, LinkArgs, LinkTaskArg, PartitionArgs, PruneArgs,
    SourcesArgs,
};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{ConvertResult, LinkResult, PartitionResult, PruneResult, SourcesResult};

pub fn run_convert(args: &ConvertArgs, config: &PipelineConfig) -> Result<ConvertResult> {
    let ingest = ingest_options(args, &config.input);
    let table = load_mapping(args.mapping.as_deref())?;
    let dataset = convert(&args.input, &table, &ingest, config)?;
    let records = dataset.data.instances_of(&config.mapping.record_class).len();

    let outputs = if args.dry_run {
        info!("dry run, no outputs written");
        None
    } else {
        Some(write_dataset(&args.output_dir, &dataset)?)
    };

    Ok(ConvertResult {
        input: args.input.clone(),
        records,
        data_triples: dataset.data.len(),
        schema_triples: dataset.schema.len(),
        errors: dataset.errors,
        outputs,
    })
}

fn ingest_options(args: &ConvertArgs, base: &IngestOptions) -> IngestOptions {
    let mut options = base.clone();
    if let Some(delimiter) = args.delimiter {
        options.delimiter = match delimiter {
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Semicolon => Delimiter::Semicolon,
        };
    }
    if let Some(id_column) = &args.id_column {
        options.id_column.clone_from(id_column);
    }
    if args.name_column.is_some() {
        options.name_column.clone_from(&args.name_column);
    }
    options
}

pub fn run_prune(args: &PruneArgs, config: &PipelineConfig) -> Result<PruneResult> {
    let span = info_span!("prune", input = %args.input.display());
    let _guard = span.enter();

    let mut graph = read_graph(&args.input)?;
    let census = load_census(args.census.as_deref())?;
    let report = prune(
        &mut graph,
        &config.mapping.record_class,
        &census,
        &config.prune,
        config.mapping.processing_date(),
    );
    write_graph(&args.output, &graph)?;

    Ok(PruneResult {
        output: args.output.clone(),
        census_names: census.len(),
        report,
        triples: graph.len(),
    })
}

pub fn run_partition(args: &PartitionArgs, config: &PipelineConfig) -> Result<PartitionResult> {
    let span = info_span!("partition", input = %args.input.display());
    let _guard = span.enter();

    if args.public == args.restricted {
        bail!("public and restricted outputs must be different files");
    }
    let graph = read_graph(&args.input)?;
    let (public, restricted) = partition(
        &graph,
        &config.mapping.record_class,
        &config.prune,
        config.mapping.processing_date(),
    );
    write_graph(&args.public, &public)?;
    write_graph(&args.restricted, &restricted)?;

    Ok(PartitionResult {
        public: args.public.clone(),
        restricted: args.restricted.clone(),
        public_triples: public.len(),
        restricted_triples: restricted.len(),
    })
}

pub fn run_link(args: &LinkArgs, config: &PipelineConfig) -> Result<LinkResult> {
    let target = match args.task {
        LinkTaskArg::Ranks => LinkTarget::Literals(vec![LinkTask::ranks()]),
        LinkTaskArg::Units => LinkTarget::Literals(vec![LinkTask::units()]),
        LinkTaskArg::Camps => LinkTarget::Literals(vec![LinkTask::camps()]),
        LinkTaskArg::Occupations => LinkTarget::Literals(vec![LinkTask::occupations()]),
        LinkTaskArg::Municipalities => LinkTarget::Literals(LinkTask::municipalities()),
        LinkTaskArg::Persons => LinkTarget::Persons,
    };
    let task = match &target {
        LinkTarget::Literals(tasks) => tasks
            .first()
            .map_or_else(String::new, |task| task.name.clone()),
        LinkTarget::Persons => "persons".to_string(),
    };
    let span = info_span!("link_file", input = %args.input.display());
    let _guard = span.enter();

    let graph = read_graph(&args.input)?;
    let outcome = link(
        &graph,
        &target,
        &args.candidates,
        &config.mapping.record_class,
        &config.scoring,
        config.oracle,
    )?;
    write_graph(&args.output, &outcome.graph)?;

    Ok(LinkResult {
        task,
        output: args.output.clone(),
        report: outcome.report,
    })
}

pub fn run_sources(args: &SourcesArgs) -> Result<SourcesResult> {
    let span = info_span!("sources", input = %args.input.display());
    let _guard = span.enter();

    let index = load_source_index(args.index.as_deref())?;
    let mut graph = read_graph(&args.input)?;
    let report = link_sources(&mut graph, &index);
    write_graph(&args.output, &graph)?;

    Ok(SourcesResult {
        output: args.output.clone(),
        indexed: index.len(),
        report,
        triples: graph.len(),
    })
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let mapping = load_mapping(args.mapping.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Attribute"),
        header_cell("Separator"),
        header_cell("Converter"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    for entry in mapping.entries() {
        let separator = match entry.separator {
            Separator::None => "-",
            Separator::Slash => "/",
            Separator::Semicolon => ";",
        };
        let converter = entry
            .converter
            .as_ref()
            .map_or_else(|| "-".to_string(), |converter| format!("{converter:?}"));
        let label = entry
            .label_fi
            .clone()
            .or_else(|| entry.label_en.clone())
            .unwrap_or_default();
        table.add_row(vec![
            entry.column.clone(),
            entry.attribute.to_string(),
            separator.to_string(),
            converter,
            label,
        ]);
    }
    println!("{table}");
    Ok(())
}
