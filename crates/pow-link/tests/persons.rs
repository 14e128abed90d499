use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use pow_link::{CandidateScorer, JsonOracle, Linker, OracleError};
use pow_model::{Graph, Iri, Literal, RecordId, Term, attr};

const CANDIDATES: &str = r#"{
    "Aapo Aho": [
        {"id": "http://ldf.fi/warsa/actors/person_10",
         "properties": {"family": ["\"Aho\""], "given": ["Aapo"]}},
        {"id": "http://ldf.fi/warsa/actors/person_11",
         "properties": {
            "family": ["Aho"],
            "given": ["Aapo"],
            "rank": ["http://ldf.fi/warsa/actors/ranks/Sotamies|http://ldf.fi/warsa/actors/ranks/Korpraali"],
            "birth_begin": ["\"1915-03-01\"^^xsd:date"],
            "birth_end": ["\"1915-03-01\"^^xsd:date"]
         }},
        {"id": "", "properties": {"family": ["Aho"]}}
    ],
    "Eero Bäck": [
        {"id": "http://ldf.fi/warsa/actors/person_20",
         "properties": {"family": ["Bäck"], "given": ["Eero"], "birth_begin": ["1890-01-01"]}}
    ]
}"#;

fn write_candidates() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CANDIDATES.as_bytes()).unwrap();
    file
}

fn person(graph: &mut Graph, serial: u64, given: &str, family: &str, born: NaiveDate) -> Iri {
    let entity = RecordId::new(serial).entity();
    graph.add(entity.clone(), pow_model::vocab::rdf_type(), attr::prisoner_record());
    graph.add(entity.clone(), attr::given_names(), Term::string(given));
    graph.add(entity.clone(), attr::family_name(), Term::string(family));
    graph.add(entity.clone(), attr::date_of_birth(), Literal::date(born));
    entity
}

#[test]
fn persons_are_linked_by_score() {
    let file = write_candidates();
    let oracle = JsonOracle::load(file.path()).unwrap();
    assert_eq!(oracle.len(), 2);

    let mut graph = Graph::new();
    let born = NaiveDate::from_ymd_opt(1915, 3, 1).unwrap();
    let aho = person(&mut graph, 1, "Aapo", "Aho", born);
    graph.add(
        aho.clone(),
        attr::rank(),
        Iri::new("http://ldf.fi/warsa/actors/ranks/Sotamies").unwrap(),
    );
    let back = person(&mut graph, 2, "Eero", "Bäck", born);
    let hidden = person(&mut graph, 3, "Aapo", "Aho", born);
    graph.set_flag(&hidden, attr::personal_information_removed());
    let before = graph.clone();

    let outcome = Linker::new(&oracle).link_persons(
        &graph,
        &attr::prisoner_record(),
        &CandidateScorer::default(),
    );

    assert_eq!(graph, before);
    assert_eq!(outcome.report.accepted, 1);
    assert_eq!(outcome.report.rejected, 1);
    assert_eq!(outcome.report.total(), 2);
    assert_eq!(
        outcome.graph.value(&aho, &attr::person_link()),
        Some(&Term::Iri(
            Iri::new("http://ldf.fi/warsa/actors/person_11").unwrap()
        ))
    );
    assert!(outcome.graph.value(&back, &attr::person_link()).is_none());
    assert!(outcome.graph.value(&hidden, &attr::person_link()).is_none());
}

#[test]
fn malformed_candidate_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[1, 2").unwrap();
    assert!(matches!(
        JsonOracle::load(file.path()),
        Err(OracleError::Parse { .. })
    ));
}
