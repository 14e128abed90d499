use chrono::NaiveDate;
use proptest::prelude::*;

use pow_transform::{DateBounds, Separator, read_values};

fn bounds() -> DateBounds {
    DateBounds::new(
        NaiveDate::from_ymd_opt(1939, 11, 30).unwrap(),
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
    )
}

proptest! {
    #[test]
    fn unseparated_cell_is_one_trimmed_value(raw in "[ a-zA-ZåäöÅÄÖ0-9,.:()/;-]{0,40}") {
        let b = bounds();
        let values: Vec<_> = read_values(&raw, Separator::None, &b).collect();
        prop_assert_eq!(values.len(), 1);
        prop_assert_eq!(values[0].value.as_str(), raw.trim());
        prop_assert!(values[0].sources.is_empty());
    }

    #[test]
    fn cell_without_slash_is_one_value(raw in "[ a-zA-ZåäöÅÄÖ0-9,.-]{0,40}") {
        let b = bounds();
        let values: Vec<_> = read_values(&raw, Separator::Slash, &b).collect();
        prop_assert_eq!(values.len(), 1);
        prop_assert_eq!(values[0].value.as_str(), raw.trim());
    }

    #[test]
    fn cell_without_semicolon_is_one_value(raw in "[ a-zA-ZåäöÅÄÖ,]{0,40}") {
        let b = bounds();
        let values: Vec<_> = read_values(&raw, Separator::Semicolon, &b).collect();
        prop_assert_eq!(values.len(), 1);
        prop_assert_eq!(values[0].value.as_str(), raw.trim());
        prop_assert!(values[0].errors.is_empty());
    }

    #[test]
    fn semicolon_count_matches_value_count(parts in prop::collection::vec("[a-zA-Z ]{1,10}", 1..6)) {
        let b = bounds();
        let raw = parts.join(";");
        prop_assert_eq!(read_values(&raw, Separator::Semicolon, &b).count(), parts.len());
    }
}
