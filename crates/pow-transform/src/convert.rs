//! Value converters.
//!
//! Converters never fail. A value that cannot be converted is passed through
//! as text so a literal can still be emitted; reporting is left to validators.

use serde::{Deserialize, Serialize};

use pow_model::Iri;
use pow_model::vocab::{MARITAL_STATUSES, SCHEMA_POW};

use crate::date::{DateValue, convert_date};

/// Converter selected by a column mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Converter {
    /// Day-first date.
    Date,
    /// A lone `-` means "no value".
    StripDash,
    Integer,
    /// Marital status synonym to a status IRI.
    MaritalStatus,
    /// Finland-Swedish marker to a mother tongue IRI.
    MotherTongue,
    /// The value is an IRI reference.
    Iri,
}

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedValue {
    Empty,
    Text(String),
    Date(DateValue),
    Integer(i64),
    Iri(Iri),
}

impl ConvertedValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            Self::Date(DateValue::Raw(raw)) => raw.is_empty(),
            _ => false,
        }
    }

    /// Text form of the value, used in error messages.
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Date(date) => date.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Iri(iri) => iri.to_string(),
        }
    }
}

impl Converter {
    pub fn convert(&self, raw: &str) -> ConvertedValue {
        let raw = raw.trim();
        if raw.is_empty() {
            return ConvertedValue::Empty;
        }
        match self {
            Self::Date => ConvertedValue::Date(convert_date(raw)),
            Self::StripDash => match strip_dash(raw) {
                "" => ConvertedValue::Empty,
                value => ConvertedValue::Text(value.to_string()),
            },
            Self::Integer => convert_int(raw)
                .map_or_else(|| ConvertedValue::Text(raw.to_string()), ConvertedValue::Integer),
            Self::MaritalStatus => ConvertedValue::Iri(marital_status(raw)),
            Self::MotherTongue => match mother_tongue(raw) {
                Some(iri) => ConvertedValue::Iri(iri),
                None => ConvertedValue::Text(raw.to_string()),
            },
            Self::Iri => match Iri::new(raw) {
                Ok(iri) => ConvertedValue::Iri(iri),
                Err(_) => ConvertedValue::Text(raw.to_string()),
            },
        }
    }
}

pub fn strip_dash(raw: &str) -> &str {
    if raw.trim() == "-" { "" } else { raw }
}

/// Parse an integer, tolerating surrounding whitespace and a trailing `.0`.
pub fn convert_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    trimmed.parse().ok()
}

/// Canonical marital status code names.
pub const MARITAL_STATUS_CODES: [&str; 5] =
    ["Naimisissa", "Naimaton", "Eronnut", "Leski", "Tuntematon"];

/// Marital status synonyms, lowercase.
const MARITAL_STATUS_MAP: [(&str, &str); 6] = [
    ("asumuserossa", "Naimisissa"),
    ("naimisissa", "Naimisissa"),
    ("naimaton", "Naimaton"),
    ("naimato", "Naimaton"),
    ("eronnut", "Eronnut"),
    ("leski", "Leski"),
];

/// Map a marital status synonym to its code, defaulting to `Tuntematon` (unknown).
pub fn marital_status(raw: &str) -> Iri {
    let key = raw.trim().to_lowercase();
    let code = MARITAL_STATUS_MAP
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map_or("Tuntematon", |(_, code)| *code);
    MARITAL_STATUSES.iri(code)
}

pub fn marital_status_unknown() -> Iri {
    MARITAL_STATUSES.iri("Tuntematon")
}

/// Mother tongue IRI for Swedish speakers.
pub fn swedish() -> Iri {
    SCHEMA_POW.iri("mother_tongue_swedish")
}

/// The Finland-Swedish column marks Swedish speakers with `x`, `kyllä` or `ruotsi`.
pub fn mother_tongue(raw: &str) -> Option<Iri> {
    match raw.trim().to_lowercase().as_str() {
        "x" | "kyllä" | "ruotsi" => Some(swedish()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_dash_only_drops_lone_dash() {
        assert_eq!(strip_dash("-"), "");
        assert_eq!(strip_dash("Foo-Bar"), "Foo-Bar");
        assert_eq!(Converter::StripDash.convert(" - "), ConvertedValue::Empty);
    }

    #[test]
    fn integers() {
        assert_eq!(convert_int("3"), Some(3));
        assert_eq!(convert_int("3.0"), Some(3));
        assert_eq!(convert_int("kolme"), None);
        assert_eq!(
            Converter::Integer.convert("kolme"),
            ConvertedValue::Text("kolme".to_string())
        );
    }

    #[test]
    fn marital_status_synonyms() {
        assert_eq!(marital_status("Naimato").local_name(), "Naimaton");
        assert_eq!(marital_status("asumuserossa").local_name(), "Naimisissa");
        assert_eq!(marital_status("kihloissa"), marital_status_unknown());
    }

    #[test]
    fn mother_tongue_marker() {
        assert_eq!(mother_tongue("x"), Some(swedish()));
        assert_eq!(mother_tongue("Kyllä"), Some(swedish()));
        assert_eq!(mother_tongue("ei"), None);
    }

    #[test]
    fn iri_converter_falls_back_to_text() {
        assert!(matches!(
            Converter::Iri.convert("http://example.com/a"),
            ConvertedValue::Iri(_)
        ));
        assert_eq!(
            Converter::Iri.convert("ei linkkiä"),
            ConvertedValue::Text("ei linkkiä".to_string())
        );
    }
}
