//! Archival source resources.
//!
//! Provenance statements carry their source as a `dct:source` literal. This
//! pass creates one `Source` resource per distinct reference, seeded from an
//! optional source index, and points the statements at it. The graph is
//! rewritten in place; running it twice changes nothing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pow_model::vocab::{DATA_NS, dct_source, pref_label, rdf_type};
use pow_model::{Graph, Iri, Term, Triple, attr};

/// One row of the source index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    #[serde(rename = "Merkintä")]
    pub label: String,
    #[serde(rename = "Selitys", default)]
    pub description: Option<String>,
    #[serde(rename = "Sijainti", default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceReport {
    /// Source resources added to the graph.
    pub created: usize,
    /// Statements whose literal source now points at a resource.
    pub rewritten: usize,
}

/// Lowercase ASCII slug: letters and digits kept, Finnish vowels folded,
/// every other run of characters collapsed to one `-`.
pub fn source_slug(reference: &str) -> String {
    let mut slug = String::with_capacity(reference.len());
    let mut pending_dash = false;
    for c in reference.trim().chars().flat_map(char::to_lowercase) {
        let c = match c {
            'ä' | 'å' => 'a',
            'ö' => 'o',
            _ => c,
        };
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// `None` when the reference has no letters or digits to name it by.
pub fn source_iri(reference: &str) -> Option<Iri> {
    let slug = source_slug(reference);
    (!slug.is_empty()).then(|| DATA_NS.iri(&format!("source_{slug}")))
}

/// Create source resources and rewrite literal `dct:source` objects to them.
pub fn link_sources(graph: &mut Graph, index: &[SourceEntry]) -> SourceReport {
    let mut report = SourceReport::default();
    let mut sources: BTreeMap<String, Iri> = BTreeMap::new();

    for entry in index {
        let label = entry.label.trim();
        let Some(iri) = source_iri(label) else {
            continue;
        };
        let name = entry
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(label);
        if add_source(graph, &iri, name) {
            report.created += 1;
        }
        if let Some(location) = entry.location.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            graph.add(iri.clone(), attr::location(), Term::string(location));
        }
        sources.insert(source_slug(label), iri);
    }

    let literal_sources: Vec<Triple> = graph
        .matching(None, Some(&dct_source()), None)
        .into_iter()
        .filter(|t| t.object.as_literal().is_some())
        .cloned()
        .collect();
    for triple in literal_sources {
        let reference = triple.object.value_str().trim();
        let slug = source_slug(reference);
        let iri = match sources.get(&slug) {
            Some(iri) => iri.clone(),
            None => {
                let Some(iri) = source_iri(reference) else {
                    warn!(statement = %triple.subject, "source reference has nothing to name it by");
                    continue;
                };
                if add_source(graph, &iri, reference) {
                    report.created += 1;
                    info!(source = %iri, "added source from reference");
                }
                sources.insert(slug, iri.clone());
                iri
            }
        };
        debug!(statement = %triple.subject, source = %iri, "pointing literal source to resource");
        graph.remove(&triple);
        graph.add(triple.subject, triple.predicate, iri);
        report.rewritten += 1;
    }

    info!(
        sources = sources.len(),
        created = report.created,
        rewritten = report.rewritten,
        "sources linked"
    );
    report
}

/// Returns whether the resource is new to the graph.
fn add_source(graph: &mut Graph, iri: &Iri, label: &str) -> bool {
    let created = graph.add(iri.clone(), rdf_type(), attr::source_class());
    if graph.value(iri, &pref_label()).is_none() {
        graph.add(iri.clone(), pref_label(), Term::string(label));
    }
    created
}

#[cfg(test)]
mod tests {
    use pow_model::{RecordId, ReificationId, ReificationReason};

    use super::*;

    fn statement(graph: &mut Graph, id: u64, source: &str) -> Iri {
        let entity = RecordId::new(id).entity();
        let node = ReificationId::derive(
            &entity,
            &attr::occupation_literal(),
            0,
            &ReificationReason::Source(0),
        )
        .iri();
        graph.add(node.clone(), dct_source(), Term::string(source));
        node
    }

    #[test]
    fn slugs_are_ascii_and_collapsed() {
        assert_eq!(source_slug(" Kansallisarkisto "), "kansallisarkisto");
        assert_eq!(source_slug("Sotilaan Ääni, 1942/3"), "sotilaan-aani-1942-3");
        assert_eq!(source_slug("--"), "");
        assert!(source_iri("  ").is_none());
        assert_eq!(
            source_iri("KA").map(|i| i.to_string()).as_deref(),
            Some("http://ldf.fi/warsa/prisoners/source_ka")
        );
    }

    #[test]
    fn literal_references_point_to_indexed_sources() {
        let mut graph = Graph::new();
        let first = statement(&mut graph, 1, "KA");
        let second = statement(&mut graph, 2, "ka ");
        let index = vec![SourceEntry {
            label: "KA".into(),
            description: Some("Kansallisarkisto".into()),
            location: Some("Helsinki".into()),
        }];

        let report = link_sources(&mut graph, &index);
        assert_eq!(report, SourceReport { created: 1, rewritten: 2 });

        let source = source_iri("KA").unwrap();
        for node in [&first, &second] {
            assert_eq!(graph.value(node, &dct_source()), Some(&Term::Iri(source.clone())));
        }
        assert_eq!(
            graph.value(&source, &pref_label()).map(Term::value_str),
            Some("Kansallisarkisto")
        );
        assert_eq!(
            graph.value(&source, &attr::location()).map(Term::value_str),
            Some("Helsinki")
        );
        assert_eq!(graph.instances_of(&attr::source_class()), vec![source]);
    }

    #[test]
    fn unknown_references_become_sources_and_rerun_is_stable() {
        let mut graph = Graph::new();
        let node = statement(&mut graph, 3, "Vankikortisto");

        let report = link_sources(&mut graph, &[]);
        assert_eq!(report, SourceReport { created: 1, rewritten: 1 });
        let source = source_iri("Vankikortisto").unwrap();
        assert_eq!(graph.value(&node, &dct_source()), Some(&Term::Iri(source.clone())));
        assert_eq!(
            graph.value(&source, &pref_label()).map(Term::value_str),
            Some("Vankikortisto")
        );

        let snapshot = graph.clone();
        assert_eq!(link_sources(&mut graph, &[]), SourceReport::default());
        assert_eq!(graph, snapshot);
    }
}
