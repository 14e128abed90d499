//! Record-to-graph mapping.
//!
//! Each mapped cell is read into atomic values, converted, validated and
//! emitted as attribute triples of the record entity. Structured values
//! become resource nodes; cited sources and date ranges become reification
//! nodes about the emitted triple. Nothing here fails: every problem is an
//! [`ErrorRecord`] in the returned log.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use pow_ingest::SourceRecord;
use pow_map::{ColumnMapping, ColumnPlan, MappingTable, render_label};
use pow_model::vocab::{self, attr};
use pow_model::{
    ErrorLog, ErrorRecord, Graph, Iri, Literal, ReificationId, ReificationReason, Term, Triple,
    resource_iri,
};
use pow_transform::{AtomicValue, ConvertedValue, DateBounds, DateValue, convert_person_name, read_values};
use pow_validate::validate_person_name;

pub(crate) const NO_USABLE_DATA: &str = "Henkilöllä ei ole käytettäviä tietoja";

/// Maps source records of one input file.
#[derive(Debug)]
pub struct RowMapper<'a> {
    table: &'a MappingTable,
    plan: ColumnPlan,
    headers: Vec<String>,
    name_header: String,
    bounds: DateBounds,
    record_class: Iri,
}

/// Term for a converted value, or `None` when there is nothing to emit.
pub fn value_term(value: &ConvertedValue) -> Option<Term> {
    if value.is_empty() {
        return None;
    }
    let term = match value {
        ConvertedValue::Empty => return None,
        ConvertedValue::Text(text) => Term::string(text.clone()),
        ConvertedValue::Date(date) => date_term(date)?,
        ConvertedValue::Integer(n) => Literal::integer(*n).into(),
        ConvertedValue::Iri(iri) => iri.clone().into(),
    };
    Some(term)
}

/// `xsd:date` literal for a parsed date, plain string for a kept raw token.
pub fn date_term(date: &DateValue) -> Option<Term> {
    match date {
        DateValue::Date(date) => Some(Literal::date(*date).into()),
        DateValue::Raw(raw) if raw.trim().is_empty() => None,
        DateValue::Raw(raw) => Some(Term::string(raw.trim())),
    }
}

struct RowState<'r> {
    record: &'r SourceRecord,
    entity: Iri,
    display_name: String,
    graph: Graph,
    errors: ErrorLog,
    next_index: BTreeMap<Iri, usize>,
    emitted: usize,
}

impl RowState<'_> {
    fn error(&mut self, column: &str, message: impl Into<String>, value: &str) {
        self.errors.push(ErrorRecord::new(
            self.record.id.to_string(),
            self.display_name.clone(),
            column,
            message,
            value,
        ));
    }

    fn emit(&mut self, predicate: Iri, object: impl Into<Term>) -> Triple {
        let triple = Triple::new(self.entity.clone(), predicate, object);
        self.graph.insert(triple.clone());
        self.emitted += 1;
        triple
    }

    fn reify(&mut self, triple: &Triple, index: usize, reason: &ReificationReason) -> Iri {
        let node = ReificationId::derive(&triple.subject, &triple.predicate, index, reason).iri();
        let graph = &mut self.graph;
        graph.add(node.clone(), vocab::rdf_type(), vocab::rdf_statement());
        graph.add(node.clone(), vocab::rdf_subject(), triple.subject.clone());
        graph.add(node.clone(), vocab::rdf_predicate(), triple.predicate.clone());
        graph.add(node.clone(), vocab::rdf_object(), triple.object.clone());
        node
    }
}

impl<'a> RowMapper<'a> {
    /// Plan the columns of an input file against the mapping table.
    ///
    /// The identifier and name columns are handled separately and never
    /// resolved against the table.
    pub fn new(
        table: &'a MappingTable,
        headers: &[String],
        id_header: &str,
        name_header: &str,
        bounds: DateBounds,
        record_class: Iri,
    ) -> Self {
        let plan = table.plan(headers, &[id_header, name_header]);
        debug!(
            mapped = plan.mapped.len(),
            dropped = plan.dropped.len(),
            "planned input columns"
        );
        Self {
            table,
            plan,
            headers: headers.to_vec(),
            name_header: name_header.to_string(),
            bounds,
            record_class,
        }
    }

    pub fn plan(&self) -> &ColumnPlan {
        &self.plan
    }

    /// Map one record to its graph fragment and error log.
    pub fn map_row(&self, record: &SourceRecord) -> (Graph, ErrorLog) {
        let entity = record.id.entity();
        let name = convert_person_name(&record.name);
        let display_name = if name.full.is_empty() {
            record.name.trim().to_string()
        } else {
            name.full.clone()
        };
        let mut row = RowState {
            record,
            entity,
            display_name,
            graph: Graph::new(),
            errors: ErrorLog::new(),
            next_index: BTreeMap::new(),
            emitted: 0,
        };

        if !record.name.trim().is_empty() {
            if !name.given.is_empty() {
                row.emit(attr::given_names(), Term::string(name.given.clone()));
            }
            row.emit(attr::family_name(), Term::string(name.family.clone()));
            row.emit(vocab::pref_label(), Term::string(name.full.clone()));
            row.emit(attr::original_name(), Term::string(record.name.trim()));
            if let Some(issue) = validate_person_name(&name, &record.name) {
                row.error(&self.name_header, issue.message(), &record.name);
            }
        }

        for &(column_index, entry_index) in &self.plan.mapped {
            let Some(entry) = self.table.get(entry_index) else {
                continue;
            };
            let raw = record.cell(column_index);
            if raw.trim().is_empty() {
                continue;
            }
            let header = &self.headers[column_index];
            self.map_cell(&mut row, header, entry, raw);
        }

        if row.emitted > 0 {
            row.graph.add(
                row.entity.clone(),
                vocab::rdf_type(),
                self.record_class.clone(),
            );
        } else {
            row.error("", NO_USABLE_DATA, record.name.trim());
        }

        trace!(record = %record.id, triples = row.graph.len(), "mapped record");
        (row.graph, row.errors)
    }

    fn map_cell(&self, row: &mut RowState<'_>, header: &str, entry: &ColumnMapping, raw: &str) {
        let base = row.next_index.get(&entry.attribute).copied().unwrap_or(0);
        let mut count = 0;
        for (offset, value) in read_values(raw, entry.separator, &self.bounds).enumerate() {
            count = offset + 1;
            self.map_value(row, header, entry, base + offset, &value);
        }
        row.next_index.insert(entry.attribute.clone(), base + count);
    }

    fn map_value(
        &self,
        row: &mut RowState<'_>,
        header: &str,
        entry: &ColumnMapping,
        index: usize,
        value: &AtomicValue,
    ) {
        for message in &value.errors {
            row.error(header, message.clone(), &value.value);
        }

        let converted = match entry.converter {
            Some(converter) => converter.convert(&value.value),
            None if value.value.is_empty() => ConvertedValue::Empty,
            None => ConvertedValue::Text(value.value.clone()),
        };

        if let Some(validator) = entry.validator
            && !value.has_errors()
            && let Some(issue) = validator.validate(&converted, &value.value, &self.bounds)
        {
            row.error(header, issue.message(), &value.value);
        }

        let Some(object) = value_term(&converted) else {
            return;
        };

        let triple = match &entry.resource {
            Some(resource) => {
                let node = resource_iri(&row.entity, &entry.attribute, index);
                let graph = &mut row.graph;
                graph.add(node.clone(), vocab::rdf_type(), resource.class.clone());
                graph.add(node.clone(), resource.value_attribute.clone(), object);
                if resource.order_number {
                    graph.add(node.clone(), attr::order(), Literal::integer(index as i64));
                }
                if resource.dates {
                    if let Some(begin) = value.date_begin.as_ref().and_then(date_term) {
                        graph.add(node.clone(), attr::date_begin(), begin);
                    }
                    if let Some(end) = value.date_end.as_ref().and_then(date_term) {
                        graph.add(node.clone(), attr::date_end(), end);
                    }
                }
                for (template, language) in [(&resource.label_fi, "fi"), (&resource.label_en, "en")] {
                    if let Some(template) = template {
                        graph.add(
                            node.clone(),
                            vocab::pref_label(),
                            Literal::lang(render_label(template, &row.display_name), language),
                        );
                    }
                }
                row.emit(entry.attribute.clone(), node)
            }
            None => row.emit(entry.attribute.clone(), object),
        };

        for (n, source) in value.sources.iter().enumerate() {
            let node = row.reify(&triple, index, &ReificationReason::Source(n));
            row.graph
                .add(node, vocab::dct_source(), Term::string(source.clone()));
        }

        if entry.resource.is_none() {
            let begin = value.date_begin.as_ref().and_then(date_term);
            let end = value.date_end.as_ref().and_then(date_term);
            if begin.is_some() || end.is_some() {
                let node = row.reify(&triple, index, &ReificationReason::Dates);
                if let Some(begin) = begin {
                    row.graph.add(node.clone(), attr::date_begin(), begin);
                }
                if let Some(end) = end {
                    row.graph.add(node, attr::date_end(), end);
                }
            }
        }
    }
}
