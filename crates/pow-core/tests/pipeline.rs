use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDate;
use proptest::prelude::*;

use pow_core::{MappingOptions, NameCensus, PruneOptions, assemble, partition, prune};
use pow_ingest::{IngestOptions, read_source_table_from};
use pow_map::prisoner_mapping;
use pow_model::vocab::{self, attr};
use pow_model::{Graph, Term, Triple};

const INPUT: &str = "\
nro,sukunimi ja etunimet,syntymäaika,kuollut,kuolinsyy,vankeuspaikat,siviilisääty,outo sarake
1,Virtanen Matti Akseli,1.2.1912 (KA),13.1.1943,keuhkokuume,Leiri 158 13.10.1942-xx.11.1942,naimaton,x
2,Huurre ent. Hildén Aapo Antero,3.4.1920,,,RGVA: Leiri 99,leski / eronnut (Kortisto),
3,Mäkinen Eino,5.6.1915,1.1.1990,,,,
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options() -> MappingOptions {
    MappingOptions {
        processing_date: Some(ymd(2017, 6, 1)),
        ..MappingOptions::default()
    }
}

fn dataset() -> pow_core::Dataset {
    let source =
        read_source_table_from(Cursor::new(INPUT), Path::new("vangit.csv"), &IngestOptions::default())
            .unwrap();
    assemble(&source, &prisoner_mapping().unwrap(), &options())
}

fn assert_no_orphaned_reifications(graph: &Graph) {
    let (rdf_subject, rdf_predicate, rdf_object) =
        (vocab::rdf_subject(), vocab::rdf_predicate(), vocab::rdf_object());
    for node in graph.instances_of(&vocab::rdf_statement()) {
        let subject = graph.value(&node, &rdf_subject).and_then(Term::as_iri).unwrap();
        let predicate = graph.value(&node, &rdf_predicate).and_then(Term::as_iri).unwrap();
        let object = graph.value(&node, &rdf_object).unwrap();
        let triple = Triple::new(subject.clone(), predicate.clone(), object.clone());
        assert!(graph.contains(&triple), "orphaned reification {node}");
    }
}

#[test]
fn assembles_records_and_errors() {
    let dataset = dataset();
    let records = dataset.data.instances_of(&attr::prisoner_record());
    assert_eq!(records.len(), 3);
    assert_no_orphaned_reifications(&dataset.data);

    let errors: Vec<_> = dataset.errors.iter().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].record_id, "2");
    assert_eq!(errors[0].column, "sukunimi ja etunimet");
    assert_eq!(
        errors[0].message,
        "Tulkittu nimi [Huurre (ent. Hildén) Aapo Antero] poikkeaa alkuperäisestä"
    );

    assert!(!dataset.schema.is_empty());
}

#[test]
fn pruning_is_idempotent_and_keeps_provenance_consistent() {
    let mut once = dataset().data;
    prune(
        &mut once,
        &attr::prisoner_record(),
        &NameCensus::new(),
        &PruneOptions::default(),
        ymd(2017, 6, 1),
    );
    assert_no_orphaned_reifications(&once);

    let mut twice = once.clone();
    let report = prune(
        &mut twice,
        &attr::prisoner_record(),
        &NameCensus::new(),
        &PruneOptions::default(),
        ymd(2017, 6, 1),
    );
    assert_eq!(report.removed_triples, 0);
    assert!(twice.is_isomorphic(&once));

    let huurre = pow_model::RecordId::new(2).entity();
    assert!(once.has_true_flag(&huurre, &attr::personal_information_removed()));
    let makinen = pow_model::RecordId::new(3).entity();
    assert!(once.has_true_flag(&makinen, &attr::hide_documents()));
    assert!(!once.has_true_flag(&makinen, &attr::personal_information_removed()));
}

#[test]
fn partition_recombines_to_the_input() {
    let data = dataset().data;
    let (public, restricted) = partition(
        &data,
        &attr::prisoner_record(),
        &PruneOptions::default(),
        ymd(2017, 6, 1),
    );
    let virtanen = pow_model::RecordId::new(1).entity();
    assert!(public.about(&virtanen).next().is_some());
    assert!(restricted.about(&virtanen).next().is_none());

    let mut union = public;
    union.merge(restricted);
    assert!(union.is_isomorphic(&data));
}

fn person_graph(records: &[(Option<i32>, Option<i32>)]) -> Graph {
    let mut graph = Graph::new();
    for (n, (born, died)) in records.iter().enumerate() {
        let person = pow_model::RecordId::new(n as u64).entity();
        graph.add(person.clone(), vocab::rdf_type(), attr::prisoner_record());
        graph.add(person.clone(), attr::family_name(), Term::string(format!("Suku{}", n % 3)));
        graph.add(person.clone(), attr::cause_of_death(), Term::string("tauti"));
        if let Some(year) = born {
            graph.add(
                person.clone(),
                attr::date_of_birth(),
                pow_model::Literal::date(ymd(*year, 1, 1)),
            );
        }
        if let Some(year) = died {
            graph.add(person, attr::date_of_death(), pow_model::Literal::date(ymd(*year, 6, 1)));
        }
    }
    graph
}

proptest! {
    #[test]
    fn prune_twice_equals_prune_once(
        records in prop::collection::vec(
            (prop::option::of(1880..1935i32), prop::option::of(1940..2010i32)),
            0..12,
        )
    ) {
        let census: NameCensus = [("Suku0".to_string(), 5)].into_iter().collect();
        let today = ymd(2017, 6, 1);
        let mut once = person_graph(&records);
        prune(&mut once, &attr::prisoner_record(), &census, &PruneOptions::default(), today);
        let mut twice = once.clone();
        prune(&mut twice, &attr::prisoner_record(), &census, &PruneOptions::default(), today);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn partition_is_lossless(
        records in prop::collection::vec(
            (prop::option::of(1880..1935i32), prop::option::of(1940..2010i32)),
            0..12,
        )
    ) {
        let graph = person_graph(&records);
        let (public, restricted) = partition(
            &graph,
            &attr::prisoner_record(),
            &PruneOptions::default(),
            ymd(2017, 6, 1),
        );
        prop_assert_eq!(public.len() + restricted.len(), graph.len());
        let mut union = public;
        union.merge(restricted);
        prop_assert_eq!(union, graph);
    }
}
