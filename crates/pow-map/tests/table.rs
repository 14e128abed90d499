use std::io::Write;

use chrono::NaiveDate;
use pow_map::{MappingTable, MappingTableError, render_label};
use pow_transform::{Converter, Separator};
use pow_validate::Validator;

const TABLE: &str = r#"
[[column]]
column = "palannut"
attribute = "http://ldf.fi/schema/warsa/prisoners/date_of_return"
separator = "slash"
converter = "date"
validator = { kind = "dates", after = "1939-11-30", before = "1980-01-01" }
label_fi = "Sotavankeudesta palaamisen päivämäärä"
label_en = "Date of return from captivity"

[[column]]
column = "vankeuspaikat"
attribute = "http://ldf.fi/schema/warsa/prisoners/captivity"
separator = "semicolon"

[column.resource]
class = "http://ldf.fi/schema/warsa/prisoners/Captivity"
value_attribute = "http://ldf.fi/schema/warsa/prisoners/location_literal"
order_number = true
dates = true
label_fi = "Henkilön {person} sotavankeus"
"#;

#[test]
fn loads_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();

    let table = MappingTable::load(file.path()).unwrap();
    assert_eq!(table.len(), 2);

    let returned = &table.entries()[0];
    assert_eq!(returned.separator, Separator::Slash);
    assert_eq!(returned.converter, Some(Converter::Date));
    assert_eq!(
        returned.validator,
        Some(Validator::Dates {
            after: NaiveDate::from_ymd_opt(1939, 11, 30),
            before: NaiveDate::from_ymd_opt(1980, 1, 1),
        })
    );

    let captivity = table.entries()[1].resource.as_ref().unwrap();
    assert!(captivity.order_number);
    assert_eq!(captivity.label_en, None);
    assert_eq!(
        render_label(captivity.label_fi.as_deref().unwrap(), "Virtanen, Matti"),
        "Henkilön Virtanen, Matti sotavankeus"
    );
}

#[test]
fn rejects_duplicate_columns() {
    let text = r#"
[[column]]
column = "a"
attribute = "http://example.org/a"

[[column]]
column = "a"
attribute = "http://example.org/b"
"#;
    assert!(matches!(
        MappingTable::from_toml_str(text),
        Err(MappingTableError::DuplicateColumn(c)) if c == "a"
    ));
}

#[test]
fn rejects_malformed_attribute() {
    let text = r#"
[[column]]
column = "a"
attribute = "not an iri"
"#;
    assert!(matches!(
        MappingTable::from_toml_str(text),
        Err(MappingTableError::InvalidAttribute { .. }) | Err(MappingTableError::Parse(_))
    ));
}

#[test]
fn rejects_empty_table() {
    assert!(matches!(
        MappingTable::from_toml_str(""),
        Err(MappingTableError::Empty)
    ));
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MappingTable::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, MappingTableError::Read { .. }));
}
