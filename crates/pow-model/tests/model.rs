use chrono::NaiveDate;
use pow_model::vocab::{self, DATA_NS, SCHEMA_POW};
use pow_model::{Graph, Literal, RecordId, ReificationId, ReificationReason, Term, Triple, attr};

fn sample_graph() -> Graph {
    let person = RecordId::new(12).entity();
    let mut graph = Graph::new();
    graph.add(person.clone(), vocab::rdf_type(), attr::prisoner_record());
    graph.add(person.clone(), attr::family_name(), Term::string("Huurre (ent. Hildén)"));
    graph.add(
        person.clone(),
        attr::date_of_birth(),
        Literal::date(NaiveDate::from_ymd_opt(1915, 3, 2).unwrap()),
    );
    graph
}

#[test]
fn graph_queries_by_subject_and_object() {
    let graph = sample_graph();
    let person = RecordId::new(12).entity();
    assert_eq!(graph.instances_of(&attr::prisoner_record()), vec![person.clone()]);
    assert_eq!(
        graph.value(&person, &attr::family_name()),
        Some(&Term::string("Huurre (ent. Hildén)"))
    );
    let dob = graph
        .value(&person, &attr::date_of_birth())
        .and_then(Term::as_literal)
        .and_then(Literal::as_date);
    assert_eq!(dob, NaiveDate::from_ymd_opt(1915, 3, 2));
}

#[test]
fn graphs_compare_as_sets() {
    let a = sample_graph();
    let b: Graph = a.clone().into_iter().rev().collect();
    assert!(a.is_isomorphic(&b));

    let mut c = a.clone();
    c.add(DATA_NS.iri("prisoner_99"), SCHEMA_POW.iri("rank_literal"), Term::string("sotamies"));
    assert!(!a.is_isomorphic(&c));
    assert_eq!(c.difference(&a).len(), 1);
}

#[test]
fn pattern_matching_with_wildcards() {
    let graph = sample_graph();
    let person = RecordId::new(12).entity();
    let family = attr::family_name();
    assert_eq!(graph.matching(None, Some(&family), None).len(), 1);
    assert_eq!(graph.matching(Some(&person), None, None).len(), 3);
    let missing = Term::string("nobody");
    assert!(graph.matching(None, None, Some(&missing)).is_empty());
}

#[test]
fn reification_iri_lives_in_data_namespace() {
    let person = RecordId::new(12).entity();
    let id = ReificationId::derive(&person, &attr::family_name(), 0, &ReificationReason::Source(1));
    assert!(DATA_NS.contains(&id.iri()));
    let t = Triple::new(person, attr::family_name(), Term::string("x"));
    assert_eq!(t.predicate, attr::family_name());
}
