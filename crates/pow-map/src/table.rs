//! Column mapping table.
//!
//! One record per input column: target attribute, separator policy,
//! converter, validator, labels, and an optional resource declaration for
//! values that carry structure beyond a single literal. The table is plain
//! data and can be loaded from TOML:
//!
//! ```toml
//! [[column]]
//! column = "palannut"
//! attribute = "http://ldf.fi/schema/warsa/prisoners/date_of_return"
//! separator = "slash"
//! converter = "date"
//! validator = { kind = "dates", after = "1939-11-30", before = "1980-01-01" }
//! label_fi = "Sotavankeudesta palaamisen päivämäärä"
//! label_en = "Date of return from captivity"
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pow_model::Iri;
use pow_transform::{Converter, Separator};
use pow_validate::Validator;

use crate::error::{MappingTableError, Result};

/// Structured resource created for each value of a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Class of the created resource node.
    pub class: Iri,
    /// Attribute holding the captured value on the resource node.
    pub value_attribute: Iri,
    /// Attach the zero-based value index as an order number.
    #[serde(default)]
    pub order_number: bool,
    /// Attach the value's date range to the resource node.
    #[serde(default)]
    pub dates: bool,
    /// Finnish label template; `{person}` is replaced with the display name.
    #[serde(default)]
    pub label_fi: Option<String>,
    /// English label template.
    #[serde(default)]
    pub label_en: Option<String>,
}

impl ResourceSpec {
    pub fn new(class: Iri, value_attribute: Iri) -> Self {
        Self {
            class,
            value_attribute,
            order_number: false,
            dates: false,
            label_fi: None,
            label_en: None,
        }
    }

    #[must_use]
    pub fn with_order_number(mut self) -> Self {
        self.order_number = true;
        self
    }

    #[must_use]
    pub fn with_dates(mut self) -> Self {
        self.dates = true;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, fi: &str, en: &str) -> Self {
        self.label_fi = Some(fi.to_string());
        self.label_en = Some(en.to_string());
        self
    }
}

/// Render a label template for a person.
pub fn render_label(template: &str, person: &str) -> String {
    template.replace("{person}", person)
}

/// Mapping of one input column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Declared column header (exact key or unique prefix of the input header).
    pub column: String,
    /// Target attribute.
    pub attribute: Iri,
    #[serde(default)]
    pub separator: Separator,
    #[serde(default)]
    pub converter: Option<Converter>,
    #[serde(default)]
    pub validator: Option<Validator>,
    #[serde(default)]
    pub label_fi: Option<String>,
    #[serde(default)]
    pub label_en: Option<String>,
    #[serde(default)]
    pub description_fi: Option<String>,
    #[serde(default)]
    pub resource: Option<ResourceSpec>,
}

impl ColumnMapping {
    pub fn new(column: &str, attribute: Iri) -> Self {
        Self {
            column: column.to_string(),
            attribute,
            separator: Separator::None,
            converter: None,
            validator: None,
            label_fi: None,
            label_en: None,
            description_fi: None,
            resource: None,
        }
    }

    #[must_use]
    pub fn separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn converter(mut self, converter: Converter) -> Self {
        self.converter = Some(converter);
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    #[must_use]
    pub fn labels(mut self, fi: &str, en: &str) -> Self {
        self.label_fi = Some(fi.to_string());
        self.label_en = Some(en.to_string());
        self
    }

    #[must_use]
    pub fn description(mut self, fi: &str) -> Self {
        self.description_fi = Some(fi.to_string());
        self
    }

    #[must_use]
    pub fn resource(mut self, resource: ResourceSpec) -> Self {
        self.resource = Some(resource);
        self
    }
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(rename = "column", default)]
    columns: Vec<ColumnMapping>,
}

/// The full column mapping table, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    entries: Vec<ColumnMapping>,
}

impl MappingTable {
    /// Build a table, rejecting duplicate column keys and malformed attribute IRIs.
    pub fn new(entries: Vec<ColumnMapping>) -> Result<Self> {
        if entries.is_empty() {
            return Err(MappingTableError::Empty);
        }
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.column.as_str()) {
                return Err(MappingTableError::DuplicateColumn(entry.column.clone()));
            }
            let attributes = std::iter::once(&entry.attribute).chain(
                entry
                    .resource
                    .iter()
                    .flat_map(|r| [&r.class, &r.value_attribute]),
            );
            for attribute in attributes {
                Iri::new(attribute.as_str()).map_err(|source| {
                    MappingTableError::InvalidAttribute {
                        column: entry.column.clone(),
                        source,
                    }
                })?;
            }
        }
        Ok(Self { entries })
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: MappingFile = toml::from_str(text)?;
        Self::new(file.columns)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| MappingTableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn entries(&self) -> &[ColumnMapping] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ColumnMapping> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
