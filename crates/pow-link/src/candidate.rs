//! Candidates returned by the oracle.
//!
//! The oracle hands back loosely typed strings: values may be quoted, carry a
//! `^^datatype` suffix, or pack several values into one string separated by
//! `|`. Everything is cleaned and typed here, at the boundary, so the scorer
//! only sees [`Candidate`] values.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pow_model::Iri;
use pow_transform::convert_date;

use crate::error::CandidateError;

/// One candidate exactly as the oracle returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Vec<String>>,
}

impl RawCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties
            .entry(key.to_string())
            .or_default()
            .push(value.into());
        self
    }

    /// Cleaned, non-empty values of one property.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.properties
            .get(key)
            .into_iter()
            .flatten()
            .flat_map(|v| v.split('|'))
            .map(clean_value)
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Strip a datatype suffix and surrounding quotes.
pub fn clean_value(raw: &str) -> String {
    let value = raw.trim();
    let value = match value.find("^^") {
        Some(index) => &value[..index],
        None => value,
    };
    value.trim().trim_matches('"').trim().to_string()
}

/// Inclusive date range. A single known date is a range with equal ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range between two dates in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            begin: a.min(b),
            end: a.max(b),
        }
    }

    pub fn point(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Smallest range covering all dates.
    pub fn spanning(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |range, date| match range {
            None => Some(Self::point(date)),
            Some(range) => Some(Self {
                begin: range.begin.min(date),
                end: range.end.max(date),
            }),
        })
    }

    pub fn is_point(&self) -> bool {
        self.begin == self.end
    }

    pub fn contains(&self, other: &DateRange) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    pub fn intersects(&self, other: &DateRange) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }
}

/// Property keys understood on raw candidates.
pub mod keys {
    pub const GIVEN: &str = "given";
    pub const FAMILY: &str = "family";
    pub const RANK: &str = "rank";
    pub const UNIT: &str = "unit";
    pub const OCCUPATION: &str = "occupation";
    pub const BIRTH_PLACE: &str = "birth_place";
    pub const DEATH_PLACE: &str = "death_place";
    pub const BIRTH_BEGIN: &str = "birth_begin";
    pub const BIRTH_END: &str = "birth_end";
    pub const DEATH_BEGIN: &str = "death_begin";
    pub const DEATH_END: &str = "death_end";
}

/// A typed candidate ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: Iri,
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

impl Candidate {
    /// A candidate with only an identifier.
    pub fn bare(id: Iri) -> Self {
        Self {
            id,
            given: None,
            family: None,
            ranks: Vec::new(),
            units: Vec::new(),
            occupations: Vec::new(),
            birth_places: Vec::new(),
            death_places: Vec::new(),
            birth: None,
            death: None,
        }
    }
}

/// Parse a candidate date: ISO first, then day-first.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let iso = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .or_else(|| convert_date(value).as_date())
}

/// Outcome of parsing one structured field.
enum Field<T> {
    Absent,
    Parsed(T),
    Failed,
}

fn date_field(raw: &RawCandidate, begin_key: &str, end_key: &str) -> Field<DateRange> {
    let values: Vec<String> = raw
        .values(begin_key)
        .into_iter()
        .chain(raw.values(end_key))
        .collect();
    if values.is_empty() {
        return Field::Absent;
    }
    let mut dates = Vec::with_capacity(values.len());
    for value in &values {
        match parse_date(value) {
            Some(date) => dates.push(date),
            None => {
                warn!(candidate = %raw.id, field = begin_key, %value, "unparseable candidate date");
                return Field::Failed;
            }
        }
    }
    DateRange::spanning(dates).map_or(Field::Absent, Field::Parsed)
}

impl TryFrom<&RawCandidate> for Candidate {
    type Error = CandidateError;

    fn try_from(raw: &RawCandidate) -> Result<Self, Self::Error> {
        let id = clean_value(&raw.id);
        if id.is_empty() {
            return Err(CandidateError::MissingId);
        }
        let id = Iri::new(id.clone()).map_err(|_| CandidateError::InvalidId(id))?;

        let mut candidate = Candidate::bare(id);
        candidate.given = raw.values(keys::GIVEN).into_iter().next();
        candidate.family = raw.values(keys::FAMILY).into_iter().next();
        candidate.ranks = raw.values(keys::RANK);
        candidate.units = raw.values(keys::UNIT);
        candidate.occupations = raw.values(keys::OCCUPATION);
        candidate.birth_places = raw.values(keys::BIRTH_PLACE);
        candidate.death_places = raw.values(keys::DEATH_PLACE);

        let mut tried = 0;
        let mut failed = 0;
        for (begin, end, slot) in [
            (keys::BIRTH_BEGIN, keys::BIRTH_END, &mut candidate.birth),
            (keys::DEATH_BEGIN, keys::DEATH_END, &mut candidate.death),
        ] {
            match date_field(raw, begin, end) {
                Field::Absent => {}
                Field::Parsed(range) => {
                    tried += 1;
                    *slot = Some(range);
                }
                Field::Failed => {
                    tried += 1;
                    failed += 1;
                }
            }
        }

        let has_text = candidate.given.is_some()
            || candidate.family.is_some()
            || !candidate.ranks.is_empty()
            || !candidate.units.is_empty()
            || !candidate.occupations.is_empty()
            || !candidate.birth_places.is_empty()
            || !candidate.death_places.is_empty();
        if tried > 0 && failed == tried && !has_text {
            return Err(CandidateError::Unparseable {
                id: candidate.id.to_string(),
                fields: tried,
            });
        }
        Ok(candidate)
    }
}

/// Type every raw candidate, dropping (and logging) those that cannot be used.
/// Order is preserved.
pub fn parse_candidates(raw: &[RawCandidate]) -> Vec<Candidate> {
    raw.iter()
        .filter_map(|r| match Candidate::try_from(r) {
            Ok(candidate) => Some(candidate),
            Err(error) => {
                warn!(%error, "skipping candidate");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cleans_typed_and_piped_values() {
        let raw = RawCandidate::new("http://ldf.fi/warsa/actors/person_1")
            .with("rank", "\"http://ldf.fi/warsa/actors/ranks/Sotamies\"|http://ldf.fi/warsa/actors/ranks/Korpraali")
            .with("birth_begin", "\"1911-02-03\"^^xsd:date");
        assert_eq!(raw.values("rank").len(), 2);
        assert_eq!(raw.values("birth_begin"), vec!["1911-02-03"]);
    }

    #[test]
    fn one_bad_field_keeps_the_others() {
        let raw = RawCandidate::new("http://ldf.fi/warsa/actors/person_1")
            .with("family", "Aho")
            .with("birth_begin", "huhtikuu")
            .with("death_begin", "1942-01-05");
        let candidate = Candidate::try_from(&raw).unwrap();
        assert_eq!(candidate.family.as_deref(), Some("Aho"));
        assert_eq!(candidate.birth, None);
        assert_eq!(candidate.death, Some(DateRange::point(date(1942, 1, 5))));
    }

    #[test]
    fn fully_unparseable_candidate_is_rejected() {
        let raw = RawCandidate::new("http://ldf.fi/warsa/actors/person_1")
            .with("birth_begin", "?")
            .with("death_end", "kesällä");
        assert!(matches!(
            Candidate::try_from(&raw),
            Err(CandidateError::Unparseable { fields: 2, .. })
        ));
        assert_eq!(
            Candidate::try_from(&RawCandidate::new("  ")),
            Err(CandidateError::MissingId)
        );
    }

    #[test]
    fn parse_candidates_preserves_order() {
        let raw = vec![
            RawCandidate::new("http://example.org/b"),
            RawCandidate::new(""),
            RawCandidate::new("http://example.org/a"),
        ];
        let ids: Vec<String> = parse_candidates(&raw)
            .into_iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["http://example.org/b", "http://example.org/a"]);
    }

    #[test]
    fn date_ranges() {
        let wide = DateRange::new(date(1942, 12, 31), date(1942, 1, 1));
        let point = DateRange::point(date(1942, 6, 1));
        assert_eq!(wide.begin, date(1942, 1, 1));
        assert!(wide.contains(&point));
        assert!(!point.contains(&wide));
        assert!(point.intersects(&wide));
        assert_eq!(parse_date("3.2.1911"), Some(date(1911, 2, 3)));
        assert_eq!(parse_date("1911-02-03T00:00:00"), Some(date(1911, 2, 3)));
    }
}
