//! Table normalizer: heterogeneous records to uniform rows plus the column union

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ExportError, Result};
use crate::types::{ColumnSet, Row, ScrapedRecord, NAME_COLUMN};

/// Normalized batch: rows in input order and every column seen across them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<Row>,
    pub columns: ColumnSet,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten `records` into rows.
///
/// Each row starts with `Name` set to the record's sole key, then copies the
/// detail fields in source order. A detail field literally called `Name`
/// overwrites the product name in that row. Columns are appended to the set
/// the first time any row carries them, so `Name` is always first for a
/// non-empty batch.
///
/// Fails on the first record that does not have exactly one top-level key;
/// no partial table is returned.
pub fn normalize(records: &[ScrapedRecord]) -> Result<Table> {
    let mut rows = Vec::with_capacity(records.len());
    let mut columns = ColumnSet::new();

    for (index, record) in records.iter().enumerate() {
        let mut entries = record.entries();
        let (name, details) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(ExportError::MalformedRecord {
                    index,
                    keys: record.keys(),
                })
            }
        };

        let mut row = Row::new();
        row.insert(NAME_COLUMN, name.as_str());
        columns.insert(NAME_COLUMN);

        match details {
            Value::Object(fields) => {
                for (key, value) in fields {
                    row.insert(key.as_str(), value.clone());
                    columns.insert(key);
                }
            }
            // A name with no details still yields a row
            Value::Null => {}
            _ => {
                return Err(ExportError::MalformedDetails {
                    index,
                    name: name.clone(),
                })
            }
        }

        trace!(index, name = %name, cells = row.len(), "normalized record");
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = columns.len(), "normalized batch");
    Ok(Table { rows, columns })
}
