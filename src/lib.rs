//! Flatten scraped product records into a tag-filtered CSV export.
//!
//! Records arrive as `{ "<product name>": { ...attributes } }` with attribute
//! sets that vary per record. [`normalize`] turns a batch into uniform rows
//! and the ordered union of their columns, [`resolve`] narrows the columns to
//! the ones matching the user's tags, and [`encode`] writes the CSV.
//! [`export`] runs all three.

pub mod csv_ser;
pub mod error;
pub mod export;
pub mod normalize;
pub mod request;
pub mod tags;
pub mod types;

pub use csv_ser::{encode, Quoting};
pub use error::{ExportError, Result};
pub use export::{export, select_columns, to_csv, ExportFile, ExportOptions, CSV_MIME, DEFAULT_FILENAME};
pub use normalize::{normalize, Table};
pub use request::{RecordsInput, ScrapeRequest, ScrapeResponse};
pub use tags::{resolve, tokenize, MatchMode, TagSet};
pub use types::*;
