//! Day-first date handling.
//!
//! Source dates are written `DD.MM.YYYY` or `DD/MM/YYYY`. Unknown parts are
//! written with `x` placeholders (`xx.11.1942`); such tokens cannot become
//! calendar dates and are carried through unchanged.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%d.%m.%Y"];

/// A converted date token: a calendar date, or the raw text when it did not parse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateValue {
    Date(NaiveDate),
    Raw(String),
}

impl DateValue {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Parse a day-first date. Never fails: unparseable input comes back as [`DateValue::Raw`].
pub fn convert_date(raw: &str) -> DateValue {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            debug!(raw = trimmed, %date, "converted date");
            return DateValue::Date(date);
        }
    }
    DateValue::Raw(raw.to_string())
}

/// Two or more `x` placeholders mark a date that is knowingly incomplete.
pub fn is_intentionally_unknown(raw: &str) -> bool {
    raw.chars().filter(|c| matches!(c, 'x' | 'X')).count() >= 2
}

/// Why a converted date is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateIssue {
    /// Parsed, but outside the plausible range
    OutOfRange {
        date: NaiveDate,
        after: NaiveDate,
        before: NaiveDate,
    },
    /// Neither a date nor a placeholder
    Invalid { raw: String },
}

impl fmt::Display for DateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                date,
                after,
                before,
            } => write!(f, "Päivämäärä {date} ei ole välillä {after} ... {before}"),
            Self::Invalid { .. } => f.write_str("Päivämäärä ei ole kelvollinen"),
        }
    }
}

/// Inclusive plausible-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub after: NaiveDate,
    pub before: NaiveDate,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            after: NaiveDate::from_ymd_opt(1939, 11, 30).unwrap_or_default(),
            before: Local::now().date_naive(),
        }
    }
}

impl DateBounds {
    pub fn new(after: NaiveDate, before: NaiveDate) -> Self {
        Self { after, before }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.after <= date && date <= self.before
    }

    /// Check a converted date. Intentionally unknown tokens are not reported.
    pub fn check(&self, value: &DateValue) -> Option<DateIssue> {
        match value {
            DateValue::Date(date) if !self.contains(*date) => Some(DateIssue::OutOfRange {
                date: *date,
                after: self.after,
                before: self.before,
            }),
            DateValue::Date(_) => None,
            DateValue::Raw(raw) if raw.trim().is_empty() || is_intentionally_unknown(raw) => None,
            DateValue::Raw(raw) => Some(DateIssue::Invalid { raw: raw.clone() }),
        }
    }
}
