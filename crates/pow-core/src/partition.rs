//! Public / restricted split of a dataset.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use pow_model::vocab::{self, DATA_NS, attr};
use pow_model::{Graph, Iri, Term, Triple};

use crate::config::PruneOptions;
use crate::prune::{PrivacyClass, classify};

/// Every triple describing a record: its own triples, its resource nodes,
/// and the reification nodes about either.
pub fn record_triples(graph: &Graph, person: &Iri) -> BTreeSet<Triple> {
    let mut subjects = vec![person.clone()];
    for triple in graph.about(person) {
        if let Term::Iri(object) = &triple.object
            && object != person
            && DATA_NS.contains(object)
            && graph.about(object).next().is_some()
        {
            subjects.push(object.clone());
        }
    }
    let mut reifications = Vec::new();
    for subject in &subjects {
        reifications.extend(graph.subjects(&vocab::rdf_subject(), &Term::Iri(subject.clone())));
    }
    subjects
        .iter()
        .chain(&reifications)
        .flat_map(|subject| graph.about(subject).cloned().collect::<Vec<_>>())
        .collect()
}

/// Whether a record belongs to the restricted part.
///
/// Records already carrying a pruning flag stay restricted after pruning has
/// removed the dates that made them so.
pub fn is_restricted(graph: &Graph, person: &Iri, options: &PruneOptions, today: NaiveDate) -> bool {
    graph.has_true_flag(person, &attr::personal_information_removed())
        || graph.has_true_flag(person, &attr::hide_documents())
        || classify(graph, person, options, today) != PrivacyClass::Public
}

/// Split `graph` into `(public, restricted)` without modifying any triple.
///
/// Triples not belonging to any record go to the public part, so the union
/// of both parts is the input graph.
pub fn partition(
    graph: &Graph,
    record_class: &Iri,
    options: &PruneOptions,
    today: NaiveDate,
) -> (Graph, Graph) {
    let mut restricted = BTreeSet::new();
    let mut restricted_records = 0;
    for person in graph.instances_of(record_class) {
        if is_restricted(graph, &person, options, today) {
            restricted_records += 1;
            restricted.extend(record_triples(graph, &person));
        }
    }
    let public: Graph = graph
        .iter()
        .filter(|t| !restricted.contains(*t))
        .cloned()
        .collect();
    let restricted: Graph = restricted.into_iter().collect();
    info!(
        restricted_records,
        public_triples = public.len(),
        restricted_triples = restricted.len(),
        "partitioned dataset"
    );
    (public, restricted)
}
