//! Delimited file reading with identifier and name column resolution.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pow_model::{ErrorLog, ErrorRecord, RecordId};

use crate::error::{IngestError, Result};

const INVALID_ID_MESSAGE: &str = "Tunniste puuttuu tai ei ole kelvollinen";
const DUPLICATE_ID_MESSAGE: &str = "Tunniste esiintyy useammin kuin kerran";

/// Field delimiter of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Semicolon => b';',
        }
    }
}

/// How to read an input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub delimiter: Delimiter,
    /// Header of the column holding the per-record serial number.
    pub id_column: String,
    /// Header of the free-text name column. Defaults to the first column
    /// that is not the identifier column.
    pub name_column: Option<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            id_column: "nro".to_string(),
            name_column: None,
        }
    }
}

/// One data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub id: RecordId,
    /// Raw content of the name column.
    pub name: String,
    /// Trimmed cells aligned with the table headers.
    pub cells: Vec<String>,
}

impl SourceRecord {
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A parsed input file.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub id_index: usize,
    pub name_index: usize,
    pub records: Vec<SourceRecord>,
    /// Rows skipped because of their identifier.
    pub errors: ErrorLog,
}

impl SourceTable {
    pub fn id_header(&self) -> &str {
        &self.headers[self.id_index]
    }

    pub fn name_header(&self) -> &str {
        &self.headers[self.name_index]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn check_encoding(path: &Path) -> Result<()> {
    let mut buffer = [0u8; 2];
    let read = open(path)?
        .read(&mut buffer)
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    if read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Read an input file from disk.
pub fn read_source_table(path: &Path, options: &IngestOptions) -> Result<SourceTable> {
    check_encoding(path)?;
    let file = open(path)?;
    read_source_table_from(BufReader::new(file), path, options)
}

/// Read input from any reader; `origin` names the input in errors.
pub fn read_source_table_from<R: Read>(
    reader: R,
    origin: &Path,
    options: &IngestOptions,
) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter.as_byte())
        .from_reader(reader);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: origin.to_path_buf(),
            source,
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        rows.push(row);
    }

    let mut rows = rows.into_iter();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyInput {
            path: origin.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();

    let id_index = headers
        .iter()
        .position(|h| *h == options.id_column)
        .ok_or_else(|| IngestError::MissingColumn {
            column: options.id_column.clone(),
            path: origin.to_path_buf(),
        })?;
    let name_index = match &options.name_column {
        Some(name) => headers.iter().position(|h| h == name).ok_or_else(|| {
            IngestError::MissingColumn {
                column: name.clone(),
                path: origin.to_path_buf(),
            }
        })?,
        None => (0..headers.len())
            .find(|i| *i != id_index)
            .ok_or_else(|| IngestError::MissingColumn {
                column: "name".to_string(),
                path: origin.to_path_buf(),
            })?,
    };

    let mut records = Vec::new();
    let mut errors = ErrorLog::new();
    let mut seen = BTreeSet::new();
    for row in rows {
        let mut cells = row;
        cells.resize(headers.len(), String::new());
        let raw_id = cells[id_index].clone();
        let name = cells[name_index].clone();
        let id = match RecordId::parse(&raw_id) {
            Ok(id) => id,
            Err(_) => {
                warn!(value = %raw_id, "row has no usable identifier, skipping it");
                errors.push(ErrorRecord::new(
                    raw_id.clone(),
                    name,
                    options.id_column.clone(),
                    INVALID_ID_MESSAGE,
                    raw_id,
                ));
                continue;
            }
        };
        if !seen.insert(id) {
            warn!(%id, "identifier repeats an earlier row, skipping it");
            errors.push(ErrorRecord::new(
                id.to_string(),
                name,
                options.id_column.clone(),
                DUPLICATE_ID_MESSAGE,
                raw_id,
            ));
            continue;
        }
        records.push(SourceRecord { id, name, cells });
    }

    if records.is_empty() && errors.is_empty() {
        return Err(IngestError::EmptyInput {
            path: origin.to_path_buf(),
        });
    }
    debug!(
        rows = records.len(),
        skipped = errors.len(),
        columns = headers.len(),
        "read input table"
    );

    Ok(SourceTable {
        headers,
        id_index,
        name_index,
        records,
        errors,
    })
}
