use std::fs;
use std::io::Cursor;
use std::path::Path;

use pow_ingest::{Delimiter, IngestError, IngestOptions, read_source_table, read_source_table_from};

const INPUT: &str = "\u{feff}nro,sukunimi ja etunimet,syntymäaika, kotikunta \n\
1,Virtanen Matti Akseli,1.2.1912,Helsinki\n\
\n\
2,Huurre ent. Hildén Aapo Antero,xx.xx.1915\n";

#[test]
fn reads_records_with_identifiers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vangit.csv");
    fs::write(&path, INPUT).unwrap();

    let table = read_source_table(&path, &IngestOptions::default()).unwrap();
    assert_eq!(
        table.headers,
        vec!["nro", "sukunimi ja etunimet", "syntymäaika", "kotikunta"]
    );
    assert_eq!(table.id_header(), "nro");
    assert_eq!(table.name_header(), "sukunimi ja etunimet");
    assert_eq!(table.len(), 2);
    assert!(table.errors.is_empty());

    let second = &table.records[1];
    assert_eq!(second.id.serial(), 2);
    assert_eq!(second.name, "Huurre ent. Hildén Aapo Antero");
    assert_eq!(second.cell(2), "xx.xx.1915");
    assert_eq!(second.cell(3), "");
}

#[test]
fn tab_delimited_with_explicit_name_column() {
    let input = "sukunimi ja etunimet\tid\nAho Aapo\t7\n";
    let options = IngestOptions {
        delimiter: Delimiter::Tab,
        id_column: "id".to_string(),
        name_column: Some("sukunimi ja etunimet".to_string()),
    };
    let table = read_source_table_from(Cursor::new(input), Path::new("input.tsv"), &options).unwrap();
    assert_eq!(table.records[0].id.serial(), 7);
    assert_eq!(table.records[0].name, "Aho Aapo");
}

#[test]
fn bad_and_repeated_identifiers_are_logged() {
    let input = "nro,nimi\n1,Aho Aapo\nx,Bäck Eero\n1,Aho Aapo\n";
    let table = read_source_table_from(
        Cursor::new(input),
        Path::new("input.csv"),
        &IngestOptions::default(),
    )
    .unwrap();
    assert_eq!(table.len(), 1);
    let errors: Vec<_> = table.errors.iter().collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].record_id, "x");
    assert_eq!(errors[0].name, "Bäck Eero");
    assert_eq!(errors[0].column, "nro");
    assert_eq!(errors[1].record_id, "1");
}

#[test]
fn empty_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "\n\n").unwrap();
    assert!(matches!(
        read_source_table(&path, &IngestOptions::default()),
        Err(IngestError::EmptyInput { .. })
    ));

    fs::write(&path, "nro,nimi\n").unwrap();
    assert!(matches!(
        read_source_table(&path, &IngestOptions::default()),
        Err(IngestError::EmptyInput { .. })
    ));
}

#[test]
fn missing_identifier_column() {
    let result = read_source_table_from(
        Cursor::new("nimi,kotikunta\nAho,Turku\n"),
        Path::new("input.csv"),
        &IngestOptions::default(),
    );
    assert!(matches!(result, Err(IngestError::MissingColumn { column, .. }) if column == "nro"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_source_table(&dir.path().join("none.csv"), &IngestOptions::default());
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn utf16_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf16.csv");
    fs::write(&path, [0xFF, 0xFE, b'n', 0]).unwrap();
    assert!(matches!(
        read_source_table(&path, &IngestOptions::default()),
        Err(IngestError::UnsupportedEncoding { .. })
    ));
}
