//! Dataset assembly.

use tracing::{info, info_span};

use pow_ingest::SourceTable;
use pow_map::MappingTable;
use pow_model::{ErrorLog, Graph};

use crate::config::MappingOptions;
use crate::row::RowMapper;
use crate::schema::build_schema;

/// Everything produced from one input file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub data: Graph,
    pub schema: Graph,
    /// Ingest errors first, then row errors in record order.
    pub errors: ErrorLog,
}

/// Map every record of `source` and merge the results.
pub fn assemble(source: &SourceTable, table: &MappingTable, options: &MappingOptions) -> Dataset {
    let span = info_span!("assemble", records = source.len());
    let _guard = span.enter();

    let mapper = RowMapper::new(
        table,
        &source.headers,
        source.id_header(),
        source.name_header(),
        options.date_bounds(),
        options.record_class.clone(),
    );

    let mut data = Graph::new();
    let mut errors = source.errors.clone();
    for record in &source.records {
        let (fragment, row_errors) = mapper.map_row(record);
        data.merge(fragment);
        errors.extend(row_errors);
    }

    let schema = build_schema(table);
    info!(
        triples = data.len(),
        schema_triples = schema.len(),
        errors = errors.len(),
        "assembled dataset"
    );
    Dataset {
        data,
        schema,
        errors,
    }
}
