//! Namespaces and the fixed attribute vocabulary.

use crate::term::Iri;

/// An IRI namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    prefix: &'static str,
    base: &'static str,
}

impl Namespace {
    pub const fn new(prefix: &'static str, base: &'static str) -> Self {
        Self { prefix, base }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn as_str(&self) -> &'static str {
        self.base
    }

    /// Full IRI text for a local name.
    pub fn local(&self, name: &str) -> String {
        format!("{}{}", self.base, name)
    }

    pub fn iri(&self, name: &str) -> Iri {
        Iri::from_trusted(self.local(name))
    }

    pub fn contains(&self, iri: &Iri) -> bool {
        iri.as_str().starts_with(self.base)
    }
}

pub const RDF: Namespace = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const SKOS: Namespace = Namespace::new("skos", "http://www.w3.org/2004/02/skos/core#");
pub const DCT: Namespace = Namespace::new("dct", "http://purl.org/dc/terms/");
pub const BIOC: Namespace = Namespace::new("bioc", "http://ldf.fi/schema/bioc/");
pub const SCHEMA_WARSA: Namespace = Namespace::new("warsa", "http://ldf.fi/schema/warsa/");
pub const SCHEMA_POW: Namespace = Namespace::new("ps", "http://ldf.fi/schema/warsa/prisoners/");
pub const DATA_NS: Namespace = Namespace::new("p", "http://ldf.fi/warsa/prisoners/");
pub const MARITAL_STATUSES: Namespace =
    Namespace::new("ms", "http://ldf.fi/schema/warsa/prisoners/marital_status/");

/// All namespaces, in the order prefixes are listed in serialized output.
pub const NAMESPACES: [Namespace; 9] = [
    DATA_NS,
    SCHEMA_POW,
    SCHEMA_WARSA,
    MARITAL_STATUSES,
    BIOC,
    DCT,
    SKOS,
    RDF,
    XSD,
];

pub fn rdf_type() -> Iri {
    RDF.iri("type")
}

pub fn rdf_property() -> Iri {
    RDF.iri("Property")
}

pub fn rdf_statement() -> Iri {
    RDF.iri("Statement")
}

pub fn rdf_subject() -> Iri {
    RDF.iri("subject")
}

pub fn rdf_predicate() -> Iri {
    RDF.iri("predicate")
}

pub fn rdf_object() -> Iri {
    RDF.iri("object")
}

pub fn pref_label() -> Iri {
    SKOS.iri("prefLabel")
}

pub fn dct_source() -> Iri {
    DCT.iri("source")
}

pub fn dct_description() -> Iri {
    DCT.iri("description")
}

/// Attribute and class identifiers referenced by pipeline logic.
///
/// Most attributes only appear in the column mapping table; the ones here
/// are read or written by code (name handling, provenance, pruning, linking).
pub mod attr {
    use super::{BIOC, Iri, SCHEMA_POW, SCHEMA_WARSA};

    pub fn prisoner_record() -> Iri {
        SCHEMA_WARSA.iri("PrisonerRecord")
    }

    pub fn given_names() -> Iri {
        SCHEMA_WARSA.iri("given_names")
    }

    pub fn family_name() -> Iri {
        SCHEMA_WARSA.iri("family_name")
    }

    pub fn original_name() -> Iri {
        SCHEMA_POW.iri("original_name")
    }

    pub fn date_of_birth() -> Iri {
        SCHEMA_WARSA.iri("date_of_birth")
    }

    pub fn municipality_of_birth_literal() -> Iri {
        SCHEMA_WARSA.iri("municipality_of_birth_literal")
    }

    pub fn municipality_of_birth() -> Iri {
        SCHEMA_WARSA.iri("municipality_of_birth")
    }

    pub fn municipality_of_domicile_literal() -> Iri {
        SCHEMA_POW.iri("municipality_of_domicile_literal")
    }

    pub fn municipality_of_domicile() -> Iri {
        SCHEMA_POW.iri("municipality_of_domicile")
    }

    pub fn municipality_of_residence_literal() -> Iri {
        SCHEMA_POW.iri("municipality_of_residence_literal")
    }

    pub fn municipality_of_residence() -> Iri {
        SCHEMA_POW.iri("municipality_of_residence")
    }

    pub fn municipality_of_death_literal() -> Iri {
        SCHEMA_POW.iri("municipality_of_death_literal")
    }

    pub fn municipality_of_death() -> Iri {
        SCHEMA_POW.iri("municipality_of_death")
    }

    pub fn municipality_of_capture_literal() -> Iri {
        SCHEMA_POW.iri("municipality_of_capture_literal")
    }

    pub fn municipality_of_capture() -> Iri {
        SCHEMA_POW.iri("municipality_of_capture")
    }

    pub fn mother_tongue() -> Iri {
        SCHEMA_WARSA.iri("mother_tongue")
    }

    pub fn occupation_literal() -> Iri {
        SCHEMA_POW.iri("occupation_literal")
    }

    pub fn occupation() -> Iri {
        BIOC.iri("has_occupation")
    }

    pub fn rank_literal() -> Iri {
        SCHEMA_POW.iri("rank_literal")
    }

    pub fn rank() -> Iri {
        SCHEMA_POW.iri("rank")
    }

    pub fn unit_literal() -> Iri {
        SCHEMA_POW.iri("unit_literal")
    }

    pub fn unit() -> Iri {
        SCHEMA_POW.iri("unit")
    }

    pub fn date_of_going_mia() -> Iri {
        SCHEMA_POW.iri("date_of_going_mia")
    }

    pub fn place_of_going_mia_literal() -> Iri {
        SCHEMA_POW.iri("place_of_going_mia_literal")
    }

    pub fn date_of_capture() -> Iri {
        SCHEMA_POW.iri("date_of_capture")
    }

    pub fn date_of_return() -> Iri {
        SCHEMA_POW.iri("date_of_return")
    }

    pub fn date_of_death() -> Iri {
        SCHEMA_POW.iri("date_of_death")
    }

    pub fn date_of_declaration_of_death() -> Iri {
        SCHEMA_POW.iri("date_of_declaration_of_death")
    }

    pub fn cause_of_death() -> Iri {
        SCHEMA_POW.iri("cause_of_death")
    }

    pub fn additional_information() -> Iri {
        SCHEMA_POW.iri("additional_information")
    }

    pub fn photograph() -> Iri {
        SCHEMA_POW.iri("photograph")
    }

    pub fn radio_report() -> Iri {
        SCHEMA_POW.iri("radio_report")
    }

    pub fn recording() -> Iri {
        SCHEMA_POW.iri("recording")
    }

    pub fn finnish_return_interrogation_file() -> Iri {
        SCHEMA_POW.iri("finnish_return_interrogation_file")
    }

    pub fn captivity() -> Iri {
        SCHEMA_POW.iri("captivity")
    }

    pub fn captivity_class() -> Iri {
        SCHEMA_POW.iri("Captivity")
    }

    pub fn location_literal() -> Iri {
        SCHEMA_POW.iri("location_literal")
    }

    pub fn location() -> Iri {
        SCHEMA_POW.iri("location")
    }

    pub fn order() -> Iri {
        SCHEMA_POW.iri("order")
    }

    pub fn date_begin() -> Iri {
        SCHEMA_POW.iri("date_begin")
    }

    pub fn date_end() -> Iri {
        SCHEMA_POW.iri("date_end")
    }

    pub fn personal_information_removed() -> Iri {
        SCHEMA_POW.iri("personal_information_removed")
    }

    pub fn hide_documents() -> Iri {
        SCHEMA_POW.iri("hide_documents")
    }

    /// Class of archival source resources.
    pub fn source_class() -> Iri {
        SCHEMA_WARSA.iri("Source")
    }

    pub fn person_link() -> Iri {
        SCHEMA_WARSA.iri("warsa_person")
    }
}
