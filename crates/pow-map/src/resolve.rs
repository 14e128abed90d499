//! Input header resolution.
//!
//! A header maps to the entry whose key equals it exactly, otherwise to the
//! single entry whose key is a prefix of it (`vankeuspaikat (kesken)` maps to
//! `vankeuspaikat`). Headers matching nothing or more than one key are dropped
//! with a warning; unmapped columns are expected while the input evolves.

use rapidfuzz::distance::jaro_winkler;
use tracing::warn;

use crate::table::MappingTable;

const SUGGESTION_MIN_SIMILARITY: f64 = 0.85;

/// Why a header was not mapped.
#[derive(Debug, Clone, PartialEq)]
pub enum Unresolved {
    /// No declared key matches. Carries the most similar key when one is close.
    Unmapped { closest: Option<String> },
    /// Several declared keys are prefixes of the header.
    Ambiguous { keys: Vec<String> },
}

/// A dropped input column.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedColumn {
    pub header: String,
    pub reason: Unresolved,
}

/// Header-to-entry assignment for one input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPlan {
    /// `(input column index, mapping entry index)`, in input order.
    pub mapped: Vec<(usize, usize)>,
    pub dropped: Vec<DroppedColumn>,
}

impl MappingTable {
    /// Resolve one header to an entry index.
    pub fn resolve(&self, header: &str) -> Result<usize, Unresolved> {
        let header = header.trim();
        if let Some(index) = self.entries().iter().position(|e| e.column == header) {
            return Ok(index);
        }
        let prefixed: Vec<usize> = self
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| header.starts_with(e.column.as_str()))
            .map(|(i, _)| i)
            .collect();
        match prefixed.as_slice() {
            [index] => Ok(*index),
            [] => Err(Unresolved::Unmapped {
                closest: self.closest_key(header),
            }),
            many => Err(Unresolved::Ambiguous {
                keys: many
                    .iter()
                    .filter_map(|i| self.get(*i))
                    .map(|e| e.column.clone())
                    .collect(),
            }),
        }
    }

    fn closest_key(&self, header: &str) -> Option<String> {
        let header = header.to_lowercase();
        self.entries()
            .iter()
            .map(|e| {
                let score = jaro_winkler::similarity(header.chars(), e.column.to_lowercase().chars());
                (score, &e.column)
            })
            .filter(|(score, _)| *score >= SUGGESTION_MIN_SIMILARITY)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, key)| key.clone())
    }

    /// Resolve every header of an input file. Headers listed in `skip` are
    /// handled elsewhere (identifier and name columns) and are neither mapped
    /// nor reported.
    pub fn plan(&self, headers: &[String], skip: &[&str]) -> ColumnPlan {
        let mut plan = ColumnPlan::default();
        for (column_index, header) in headers.iter().enumerate() {
            if skip.contains(&header.as_str()) {
                continue;
            }
            match self.resolve(header) {
                Ok(entry_index) => plan.mapped.push((column_index, entry_index)),
                Err(reason) => {
                    match &reason {
                        Unresolved::Unmapped { closest } => {
                            warn!(header = %header, closest = ?closest, "no mapping for column, dropping it")
                        }
                        Unresolved::Ambiguous { keys } => {
                            warn!(header = %header, ?keys, "column matches several mappings, dropping it")
                        }
                    }
                    plan.dropped.push(DroppedColumn {
                        header: header.clone(),
                        reason,
                    });
                }
            }
        }
        plan
    }
}
