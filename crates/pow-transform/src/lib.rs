//! Cell-level transformation for prisoner-of-war records.
//!
//! - **reader**: splits raw cells into atomic values with sources and date ranges
//! - **date**: day-first date conversion and plausibility bounds
//! - **name**: person name splitting and normalization
//! - **convert**: converters selected by the column mapping table

pub mod convert;
pub mod date;
pub mod name;
pub mod reader;

pub use convert::{ConvertedValue, Converter};
pub use date::{DateBounds, DateIssue, DateValue, convert_date, is_intentionally_unknown};
pub use name::{PersonName, convert_person_name, title_case};
pub use reader::{AtomicValue, Separator, read_semicolon_separated, read_value_with_source, read_values};
