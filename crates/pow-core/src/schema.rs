//! Schema graph derived from the mapping table.

use pow_map::{ColumnMapping, MappingTable, name_attributes};
use pow_model::vocab::{self, attr};
use pow_model::{Graph, Literal};

fn describe(schema: &mut Graph, entry: &ColumnMapping) {
    let Some(label_fi) = &entry.label_fi else {
        return;
    };
    let property = &entry.attribute;
    schema.add(property.clone(), vocab::rdf_type(), vocab::rdf_property());
    schema.add(
        property.clone(),
        vocab::pref_label(),
        Literal::lang(label_fi.clone(), "fi"),
    );
    if let Some(label_en) = &entry.label_en {
        schema.add(
            property.clone(),
            vocab::pref_label(),
            Literal::lang(label_en.clone(), "en"),
        );
    }
    if let Some(description) = &entry.description_fi {
        schema.add(
            property.clone(),
            vocab::dct_description(),
            Literal::lang(description.clone(), "fi"),
        );
    }
}

/// Labels and descriptions of every labelled attribute, independent of data.
///
/// Name attributes and the pruning flags are always described.
pub fn build_schema(table: &MappingTable) -> Graph {
    let mut schema = Graph::new();
    for entry in name_attributes().iter().chain(table.entries()) {
        describe(&mut schema, entry);
    }
    for (property, fi, en) in [
        (
            attr::personal_information_removed(),
            "Henkilötietoja poistettu",
            "Personal information removed",
        ),
        (
            attr::hide_documents(),
            "Piilota dokumentit",
            "Hide documents",
        ),
    ] {
        schema.add(property.clone(), vocab::rdf_type(), vocab::rdf_property());
        schema.add(property.clone(), vocab::pref_label(), Literal::lang(fi, "fi"));
        schema.add(property, vocab::pref_label(), Literal::lang(en, "en"));
    }
    schema
}
