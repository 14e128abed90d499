//! RDF terms: IRIs and literals.
//!
//! The attribute graph never contains blank nodes. Every auxiliary node
//! (resource, reification) gets a deterministic IRI instead, which keeps
//! graph comparison a plain set comparison.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::vocab::XSD;

/// An absolute IRI.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Iri(String);

impl Iri {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) || !trimmed.contains(':') {
            return Err(ModelError::InvalidIri(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build an IRI from parts known to be valid (namespace + local name).
    pub(crate) fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `/` or `#`.
    pub fn local_name(&self) -> &str {
        self.0
            .rfind(['/', '#'])
            .map_or(self.0.as_str(), |idx| &self.0[idx + 1..])
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal datatypes used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Datatype {
    String,
    /// `rdf:langString`; the language tag lives on the literal.
    LangString,
    Date,
    Integer,
    Boolean,
    Other(String),
}

impl Datatype {
    pub fn iri(&self) -> String {
        match self {
            Self::String => XSD.local("string"),
            Self::LangString => "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString".to_string(),
            Self::Date => XSD.local("date"),
            Self::Integer => XSD.local("integer"),
            Self::Boolean => XSD.local("boolean"),
            Self::Other(iri) => iri.clone(),
        }
    }

    pub fn from_iri(iri: &str) -> Self {
        match iri.strip_prefix(XSD.as_str()) {
            Some("string") => Self::String,
            Some("date") => Self::Date,
            Some("integer") => Self::Integer,
            Some("boolean") => Self::Boolean,
            _ if iri.ends_with("#langString") => Self::LangString,
            _ => Self::Other(iri.to_string()),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iri())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Datatype,
    language: Option<String>,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: Datatype::String,
            language: None,
        }
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            lexical: value.into(),
            datatype: Datatype::LangString,
            language: Some(language.into().to_lowercase()),
        }
    }

    pub fn date(date: NaiveDate) -> Self {
        Self {
            lexical: date.format("%Y-%m-%d").to_string(),
            datatype: Datatype::Date,
            language: None,
        }
    }

    pub fn integer(value: i64) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Integer,
            language: None,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            lexical: value.to_string(),
            datatype: Datatype::Boolean,
            language: None,
        }
    }

    /// Build a literal from its lexical form, checking the well-known datatypes.
    pub fn typed(lexical: impl Into<String>, datatype: Datatype) -> Result<Self> {
        let lexical = lexical.into();
        let valid = match &datatype {
            Datatype::Date => NaiveDate::parse_from_str(&lexical, "%Y-%m-%d").is_ok(),
            Datatype::Integer => lexical.parse::<i64>().is_ok(),
            Datatype::Boolean => matches!(lexical.as_str(), "true" | "false"),
            _ => true,
        };
        if !valid {
            return Err(ModelError::InvalidLiteral {
                lexical,
                datatype: datatype.iri(),
            });
        }
        Ok(Self {
            lexical,
            datatype,
            language: None,
        })
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.datatype {
            Datatype::Date => NaiveDate::parse_from_str(&self.lexical, "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.datatype {
            Datatype::Boolean => self.lexical.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical)
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Iri(Iri),
    Literal(Literal),
}

impl Term {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::string(value))
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Iri(_) => None,
        }
    }

    /// Lexical form of a literal, or the IRI text.
    pub fn value_str(&self) -> &str {
        match self {
            Self::Iri(iri) => iri.as_str(),
            Self::Literal(literal) => literal.lexical(),
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iri_rejects_blank_and_relative() {
        assert!(Iri::new("").is_err());
        assert!(Iri::new("prisoner 1").is_err());
        assert!(Iri::new("relative").is_err());
        assert!(Iri::new("http://ldf.fi/warsa/prisoners/prisoner_1").is_ok());
    }

    #[test]
    fn local_name_after_last_separator() {
        let iri = Iri::new("http://ldf.fi/schema/warsa/prisoners/date_of_capture").unwrap();
        assert_eq!(iri.local_name(), "date_of_capture");
        let hash = Iri::new("http://www.w3.org/1999/02/22-rdf-syntax-ns#type").unwrap();
        assert_eq!(hash.local_name(), "type");
    }

    #[test]
    fn typed_literal_checks_lexical_form() {
        assert!(Literal::typed("1942-10-13", Datatype::Date).is_ok());
        assert!(Literal::typed("13.10.1942", Datatype::Date).is_err());
        assert!(Literal::typed("x", Datatype::Integer).is_err());
        assert!(Literal::typed("anything", Datatype::String).is_ok());
    }

    #[test]
    fn datatype_round_trips_through_iri() {
        for datatype in [
            Datatype::String,
            Datatype::Date,
            Datatype::Integer,
            Datatype::Boolean,
            Datatype::LangString,
        ] {
            assert_eq!(Datatype::from_iri(&datatype.iri()), datatype);
        }
    }
}
