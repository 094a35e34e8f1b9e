//! One-call export: records and tags in, CSV file payload out

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::csv_ser::{encode, Quoting};
use crate::error::Result;
use crate::normalize::{normalize, Table};
use crate::tags::{resolve, MatchMode};
use crate::types::{ColumnSet, ScrapedRecord, NAME_COLUMN};

pub const DEFAULT_FILENAME: &str = "products.csv";
pub const CSV_MIME: &str = "text/csv; charset=utf-8";

/// Knobs for a single export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub match_mode: MatchMode,
    pub quoting: Quoting,
    pub filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            quoting: Quoting::Simple,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

/// Finished CSV plus what the file-save side needs to offer it to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub contents: String,
}

impl ExportFile {
    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

/// Columns of `table` selected by `tags`.
///
/// An empty batch has no observed columns, but every row would carry `Name`,
/// so tags are resolved against `[Name]` to keep the header meaningful.
pub fn select_columns<I, S>(table: &Table, tags: I, mode: MatchMode) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if table.columns.is_empty() {
        let implied: ColumnSet = [NAME_COLUMN].into_iter().collect();
        return resolve(&implied, tags, mode);
    }
    resolve(&table.columns, tags, mode)
}

/// Normalize `records`, resolve `tags`, and encode the CSV text.
pub fn to_csv<I, S>(records: &[ScrapedRecord], tags: I, options: &ExportOptions) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = normalize(records)?;
    let selected = select_columns(&table, tags, options.match_mode);
    debug!(?selected, "exporting columns");
    encode(&table.rows, &selected, options.quoting)
}

/// Like [`to_csv`], wrapped with the filename and MIME type for delivery.
pub fn export<I, S>(records: &[ScrapedRecord], tags: I, options: &ExportOptions) -> Result<ExportFile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let contents = to_csv(records, tags, options)?;
    Ok(ExportFile {
        filename: options.filename.clone(),
        mime: CSV_MIME,
        contents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSet;
    use crate::types::Tag;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<ScrapedRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_export_file_metadata() {
        let input = records(json!([{"Widget": {"price": "9.99"}}]));
        let file = export(&input, TagSet::new().labels(), &ExportOptions::default()).unwrap();
        assert_eq!(file.filename, "products.csv");
        assert_eq!(file.mime, "text/csv; charset=utf-8");
        assert_eq!(file.as_bytes(), b"Name\n\"Widget\"\n");
    }

    #[test]
    fn test_export_options_from_json() {
        let options: ExportOptions =
            serde_json::from_value(json!({"match_mode": "word", "quoting": "rfc4180"})).unwrap();
        assert_eq!(options.match_mode, MatchMode::Word);
        assert_eq!(options.quoting, Quoting::Rfc4180);
        assert_eq!(options.filename, DEFAULT_FILENAME);
    }

    #[test]
    fn test_select_columns_empty_batch() {
        let table = Table::default();
        assert_eq!(
            select_columns(&table, [Tag::Name, Tag::Price], MatchMode::Substring),
            vec!["Name"]
        );
        assert!(select_columns(&table, [Tag::Price], MatchMode::Substring).is_empty());
    }

    #[test]
    fn test_to_csv_word_mode() {
        let input = records(json!([
            {"A": {"username": "u1", "unit_price": "3"}}
        ]));
        let options = ExportOptions {
            match_mode: MatchMode::Word,
            ..ExportOptions::default()
        };
        let out = to_csv(&input, ["name", "price"], &options).unwrap();
        assert_eq!(out, "Name,unit_price\n\"A\",\"3\"\n");
    }

    #[test]
    fn test_to_csv_malformed_produces_nothing() {
        let input = records(json!([{"A": {}, "B": {}}]));
        assert!(to_csv(&input, ["name"], &ExportOptions::default()).is_err());
    }
}
