//! Column mapping for prisoner-of-war spreadsheets.
//!
//! The mapping table is data: the compiled-in default lives in [`prisoners`],
//! and a replacement can be loaded from TOML with [`MappingTable::load`].

pub mod error;
pub mod prisoners;
pub mod resolve;
pub mod table;

pub use error::{MappingTableError, Result};
pub use prisoners::{ID_COLUMN, NAME_COLUMN, name_attributes, prisoner_columns, prisoner_mapping};
pub use resolve::{ColumnPlan, DroppedColumn, Unresolved};
pub use table::{ColumnMapping, MappingTable, ResourceSpec, render_label};
