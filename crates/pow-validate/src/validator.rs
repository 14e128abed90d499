//! Validators selected by the column mapping table.
//!
//! Validators look at the converted value and report advisory issues. The
//! value is emitted regardless of what they find.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pow_transform::convert::{marital_status_unknown, swedish};
use pow_transform::{ConvertedValue, DateBounds, DateIssue, DateValue, PersonName};

use crate::issue::Issue;

/// Validator attached to a column mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Dates must fall inside the range; unset ends use the run's default bounds.
    Dates {
        #[serde(default)]
        after: Option<NaiveDate>,
        #[serde(default)]
        before: Option<NaiveDate>,
    },
    MaritalStatus,
    MotherTongue,
}

impl Validator {
    pub fn dates(after: NaiveDate, before: NaiveDate) -> Self {
        Self::Dates {
            after: Some(after),
            before: Some(before),
        }
    }

    /// Date validator using the run's default bounds.
    pub fn default_dates() -> Self {
        Self::Dates {
            after: None,
            before: None,
        }
    }

    /// Validate one converted value. `raw` is the source text of the value.
    pub fn validate(
        &self,
        value: &ConvertedValue,
        raw: &str,
        defaults: &DateBounds,
    ) -> Option<Issue> {
        match self {
            Self::Dates { after, before } => {
                let bounds = DateBounds::new(
                    after.unwrap_or(defaults.after),
                    before.unwrap_or(defaults.before),
                );
                match value {
                    ConvertedValue::Date(date) => validate_dates(date, &bounds),
                    ConvertedValue::Text(text) => validate_dates(&DateValue::Raw(text.clone()), &bounds),
                    _ => None,
                }
            }
            Self::MaritalStatus => validate_marital_status(value, raw),
            Self::MotherTongue => validate_mother_tongue(value, raw),
        }
    }
}

pub fn validate_dates(value: &DateValue, bounds: &DateBounds) -> Option<Issue> {
    let issue = bounds.check(value)?;
    if let DateIssue::OutOfRange { date, .. } = &issue {
        warn!(%date, after = %bounds.after, before = %bounds.before, "date outside plausible range");
    }
    Some(issue.into())
}

/// Compare the re-rendered name against the source cell, ignoring case.
pub fn validate_person_name(name: &PersonName, raw: &str) -> Option<Issue> {
    let interpreted = name.source_order();
    if interpreted.to_lowercase() == raw.trim().to_lowercase() {
        return None;
    }
    warn!(interpreted = %interpreted, "interpreted name differs from source");
    Some(Issue::NameDiffers { interpreted })
}

pub fn validate_marital_status(value: &ConvertedValue, raw: &str) -> Option<Issue> {
    match value {
        ConvertedValue::Iri(iri)
            if *iri == marital_status_unknown() && raw.trim().to_lowercase() != "tuntematon" =>
        {
            Some(Issue::UnknownMaritalStatus {
                raw: raw.trim().to_string(),
            })
        }
        _ => None,
    }
}

pub fn validate_mother_tongue(value: &ConvertedValue, raw: &str) -> Option<Issue> {
    match value {
        ConvertedValue::Iri(iri) if *iri == swedish() => None,
        ConvertedValue::Empty => None,
        _ => Some(Issue::UnknownMotherTongue {
            raw: raw.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pow_transform::{Converter, convert_person_name};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn defaults() -> DateBounds {
        DateBounds::new(ymd(1939, 11, 30), ymd(2020, 1, 1))
    }

    #[test]
    fn explicit_bounds_override_defaults() {
        let birth = Validator::dates(ymd(1860, 1, 1), ymd(1935, 1, 1));
        let value = Converter::Date.convert("2.3.1915");
        assert_eq!(birth.validate(&value, "2.3.1915", &defaults()), None);
        assert!(Validator::default_dates()
            .validate(&value, "2.3.1915", &defaults())
            .is_some());
    }

    #[test]
    fn date_messages_match_the_reader() {
        let bounds = defaults();
        for raw in ["13.10.1842", "3.x.1942"] {
            let value = Converter::Date.convert(raw);
            let ConvertedValue::Date(date) = &value else {
                panic!("{raw} should convert to a date value");
            };
            let reported = validate_dates(date, &bounds).unwrap();
            assert_eq!(reported.message(), bounds.check(date).unwrap().to_string());
        }
    }

    #[test]
    fn placeholder_dates_are_not_reported() {
        let value = Converter::Date.convert("xx.xx.1942");
        assert_eq!(
            Validator::default_dates().validate(&value, "xx.xx.1942", &defaults()),
            None
        );
        let value = Converter::Date.convert("3.x.1942");
        assert_eq!(
            Validator::default_dates().validate(&value, "3.x.1942", &defaults()),
            Some(Issue::Date(DateIssue::Invalid {
                raw: "3.x.1942".into()
            }))
        );
    }

    #[test]
    fn person_name_round_trip() {
        let raw = "Virtanen Matti Akseli";
        assert_eq!(validate_person_name(&convert_person_name(raw), raw), None);

        let raw = "Huurre ent. Hildén Aapo Antero";
        let issue = validate_person_name(&convert_person_name(raw), raw);
        assert_eq!(
            issue,
            Some(Issue::NameDiffers {
                interpreted: "Huurre (ent. Hildén) Aapo Antero".into()
            })
        );
    }

    #[test]
    fn enumerations() {
        let unknown = Converter::MaritalStatus.convert("kihloissa");
        assert!(validate_marital_status(&unknown, "kihloissa").is_some());
        let married = Converter::MaritalStatus.convert("naimisissa");
        assert!(validate_marital_status(&married, "naimisissa").is_none());

        let swedish = Converter::MotherTongue.convert("x");
        assert!(validate_mother_tongue(&swedish, "x").is_none());
        let other = Converter::MotherTongue.convert("ehkä");
        assert!(validate_mother_tongue(&other, "ehkä").is_some());
    }
}
