//! Cell value reader.
//!
//! Splits one raw cell into atomic values according to the column's
//! separator policy, pulling out inline source citations and date ranges.
//!
//! - `none`: the whole trimmed cell is one value.
//! - `slash`: values separated by `/` with whitespace on at least one side;
//!   each value may end with a parenthesized citation, `Oulu (mikrofilmi)`.
//! - `semicolon`: values separated by `;`; each may start with a citation
//!   terminated by `": "` and may end with a date range,
//!   `Leiri 58 13.10.1942-xx.11.1942`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::{DateBounds, DateValue, convert_date};

static SLASH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s/|/\s").expect("Invalid slash separator regex"));

static VALUE_WITH_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.+) \(([^()]+)\)(.*)").expect("Invalid value-with-source regex")
});

static VALUE_WITH_DATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)\s+([\dxX.]{5,})-([\dxX.]{5,})$").expect("Invalid date range regex")
});

const SOURCE_DELIMITER: &str = ": ";

/// How multiple values are packed into one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    None,
    Slash,
    Semicolon,
}

/// One value read from a cell, with whatever metadata was attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtomicValue {
    pub value: String,
    /// Cited sources, each kept whole (citations may contain commas).
    pub sources: Vec<String>,
    pub date_begin: Option<DateValue>,
    pub date_end: Option<DateValue>,
    /// Unparseable content following a citation.
    pub trash: Option<String>,
    /// Parse and date-range problems found while reading this value.
    pub errors: Vec<String>,
}

impl AtomicValue {
    fn plain(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Read a value with an optional trailing parenthesized citation.
///
/// Returns `(value, sources, trash)`. Content after the closing parenthesis is
/// returned as trash and the caller decides what to do with it.
pub fn read_value_with_source(raw: &str) -> (String, Vec<String>, String) {
    let raw = raw.trim();
    match VALUE_WITH_SOURCE.captures(raw) {
        Some(caps) => (
            caps[1].trim().to_string(),
            vec![caps[2].trim().to_string()],
            caps[3].trim().to_string(),
        ),
        None => (raw.to_string(), Vec::new(), String::new()),
    }
}

fn read_slash_piece(piece: &str) -> AtomicValue {
    let (value, sources, trash) = read_value_with_source(piece);
    if trash.is_empty() {
        return AtomicValue {
            value,
            sources,
            ..AtomicValue::default()
        };
    }
    warn!(trash = %trash, "found content after sources, using the whole value");
    AtomicValue {
        value: piece.trim().to_string(),
        trash: Some(trash.clone()),
        errors: vec![format!("Lähdeviitteen jälkeen ylimääräistä tekstiä: {trash}")],
        ..AtomicValue::default()
    }
}

/// Read one `;`-separated piece: leading citation, value, trailing date range.
pub fn read_semicolon_separated(raw: &str, bounds: &DateBounds) -> AtomicValue {
    let piece = raw.trim();
    let mut errors = Vec::new();

    let (sources, rest) = match piece.split_once(SOURCE_DELIMITER) {
        Some((_, rest)) if rest.contains(SOURCE_DELIMITER) => {
            warn!(value = piece, "multiple source delimiters, ignoring sources");
            errors.push(format!(
                "Arvossa on useampi lähde-erotin \"{}\"",
                SOURCE_DELIMITER.trim_end()
            ));
            (Vec::new(), piece)
        }
        Some((source, rest)) => (vec![source.trim().to_string()], rest.trim()),
        None => (Vec::new(), piece),
    };

    let mut value = AtomicValue {
        value: rest.to_string(),
        sources,
        ..AtomicValue::default()
    };

    if let Some(caps) = VALUE_WITH_DATES.captures(rest) {
        let begin = convert_date(&caps[2]);
        let end = convert_date(&caps[3]);
        for date in [&begin, &end] {
            errors.extend(bounds.check(date).map(|issue| issue.to_string()));
        }
        value.value = caps[1].trim().to_string();
        value.date_begin = Some(begin);
        value.date_end = Some(end);
    }

    value.errors = errors;
    value
}

/// Read all atomic values of a cell, lazily, in cell order.
pub fn read_values<'a>(
    raw: &'a str,
    separator: Separator,
    bounds: &'a DateBounds,
) -> Box<dyn Iterator<Item = AtomicValue> + 'a> {
    match separator {
        Separator::None => Box::new(std::iter::once(AtomicValue::plain(raw))),
        Separator::Slash => Box::new(SLASH_SPLIT.split(raw).map(read_slash_piece)),
        Separator::Semicolon => Box::new(
            raw.split(';')
                .map(move |piece| read_semicolon_separated(piece, bounds)),
        ),
    }
}
