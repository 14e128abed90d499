//! The comparison view of one prisoner record.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use pow_model::{Graph, Iri, Term, attr};
use pow_transform::convert_date;

use crate::candidate::DateRange;

static MAIDEN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(ent\.\s*(.+)\)").expect("Invalid maiden name regex"));

/// What the scorer knows about a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePerson {
    pub given: Option<String>,
    pub family: Option<String>,
    pub ranks: Vec<String>,
    pub units: Vec<String>,
    pub occupations: Vec<String>,
    pub birth_places: Vec<String>,
    pub death_places: Vec<String>,
    pub birth: Option<DateRange>,
    pub death: Option<DateRange>,
}

/// `Aho (ent. Bäck)` compares as `Aho Bäck`.
pub fn unwrap_maiden_name(family: &str) -> String {
    MAIDEN_NAME.replace_all(family, "$1").trim().to_string()
}

fn term_date(term: &Term) -> Option<NaiveDate> {
    term.as_literal()
        .and_then(|l| l.as_date())
        .or_else(|| convert_date(term.value_str()).as_date())
}

fn linked(graph: &Graph, person: &Iri, predicate: &Iri) -> Vec<String> {
    let mut values: Vec<String> = graph
        .objects(person, predicate)
        .filter_map(Term::as_iri)
        .map(|iri| iri.to_string())
        .collect();
    values.sort();
    values.dedup();
    values
}

impl SourcePerson {
    /// Collect the comparable fields of `person`. Records whose personal
    /// information was removed are not linked and yield `None`.
    pub fn from_graph(graph: &Graph, person: &Iri) -> Option<Self> {
        if graph.has_true_flag(person, &attr::personal_information_removed()) {
            return None;
        }
        let first = |predicate: Iri| {
            graph
                .objects(person, &predicate)
                .map(|t| t.value_str().trim().to_string())
                .find(|v| !v.is_empty())
        };
        let dates = |predicate: Iri| {
            DateRange::spanning(graph.objects(person, &predicate).filter_map(term_date))
        };

        Some(Self {
            given: first(attr::given_names()),
            family: first(attr::family_name()).map(|f| unwrap_maiden_name(&f)),
            ranks: linked(graph, person, &attr::rank()),
            units: linked(graph, person, &attr::unit()),
            occupations: linked(graph, person, &attr::occupation()),
            birth_places: linked(graph, person, &attr::municipality_of_birth()),
            death_places: linked(graph, person, &attr::municipality_of_death()),
            birth: dates(attr::date_of_birth()),
            death: dates(attr::date_of_death()),
        })
    }

    /// Free text handed to the oracle.
    pub fn query_text(&self) -> String {
        [self.given.as_deref(), self.family.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use pow_model::{Literal, RecordId};

    use super::*;

    #[test]
    fn maiden_name_is_unwrapped() {
        assert_eq!(unwrap_maiden_name("Aho (ent. Bäck)"), "Aho Bäck");
        assert_eq!(unwrap_maiden_name("Aho"), "Aho");
    }

    #[test]
    fn collects_fields_from_graph() {
        let person = RecordId::new(7).entity();
        let rank = Iri::new("http://ldf.fi/warsa/actors/ranks/Sotamies").unwrap();
        let mut graph = Graph::new();
        graph.add(person.clone(), attr::given_names(), Term::string("Aapo"));
        graph.add(person.clone(), attr::family_name(), Term::string("Aho (ent. Bäck)"));
        graph.add(person.clone(), attr::rank(), rank.clone());
        graph.add(person.clone(), attr::rank_literal(), Term::string("sotamies"));
        let born = NaiveDate::from_ymd_opt(1915, 3, 1).unwrap();
        graph.add(person.clone(), attr::date_of_birth(), Literal::date(born));
        graph.add(person.clone(), attr::date_of_death(), Term::string("xx.11.1942"));

        let source = SourcePerson::from_graph(&graph, &person).unwrap();
        assert_eq!(source.query_text(), "Aapo Aho Bäck");
        assert_eq!(source.ranks, vec![rank.to_string()]);
        assert_eq!(source.birth, Some(DateRange::point(born)));
        assert_eq!(source.death, None);
    }

    #[test]
    fn pruned_records_are_skipped() {
        let person = RecordId::new(8).entity();
        let mut graph = Graph::new();
        graph.add(person.clone(), attr::given_names(), Term::string("Aapo"));
        graph.set_flag(&person, attr::personal_information_removed());
        assert_eq!(SourcePerson::from_graph(&graph, &person), None);
    }
}
