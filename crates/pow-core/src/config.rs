//! Run options for mapping and pruning.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use pow_model::{Iri, attr};
use pow_transform::DateBounds;

fn default_date_after() -> NaiveDate {
    NaiveDate::from_ymd_opt(1939, 11, 30).unwrap_or_default()
}

/// Options of the row mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    /// Earliest plausible date for columns without their own bounds.
    pub date_after: NaiveDate,
    /// Latest plausible date. Unset means the processing date.
    pub date_before: Option<NaiveDate>,
    /// Date the run is considered to happen on. Unset means today.
    pub processing_date: Option<NaiveDate>,
    /// Class of the record entities.
    pub record_class: Iri,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            date_after: default_date_after(),
            date_before: None,
            processing_date: None,
            record_class: attr::prisoner_record(),
        }
    }
}

impl MappingOptions {
    pub fn processing_date(&self) -> NaiveDate {
        self.processing_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn date_bounds(&self) -> DateBounds {
        DateBounds::new(
            self.date_after,
            self.date_before.unwrap_or_else(|| self.processing_date()),
        )
    }
}

/// Thresholds of the privacy pruning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneOptions {
    /// Records of persons who died at least this many years ago are public.
    pub public_after_years: u32,
    /// Persons with no death information born on or after this date may be alive.
    pub possibly_alive_born_after: NaiveDate,
    /// Minimum census count for a family name to be considered common.
    pub common_name_min_census: u64,
    /// Minimum census count plus dataset occurrences for a common family name.
    pub common_name_threshold: u64,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            public_after_years: 50,
            possibly_alive_born_after: NaiveDate::from_ymd_opt(1911, 1, 1).unwrap_or_default(),
            common_name_min_census: 2,
            common_name_threshold: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_processing_date() {
        let options = MappingOptions {
            processing_date: NaiveDate::from_ymd_opt(2017, 6, 1),
            ..MappingOptions::default()
        };
        let bounds = options.date_bounds();
        assert_eq!(bounds.after, default_date_after());
        assert_eq!(bounds.before, NaiveDate::from_ymd_opt(2017, 6, 1).unwrap());
    }
}
