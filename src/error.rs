//! Error type for the export pipeline

use thiserror::Error;

/// Everything that can go wrong between decoded records and a CSV document.
///
/// An empty batch and a tag set that selects no columns are not errors; both
/// produce a well-formed (possibly header-only) document.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A record did not have exactly one top-level key (the product name).
    ///
    /// The whole export aborts; no partial output is produced.
    #[error("record {index} must have exactly one product name, found {} keys: [{}]", .keys.len(), .keys.join(", "))]
    MalformedRecord { index: usize, keys: Vec<String> },

    /// The product name did not map to an attribute object.
    #[error("record {index} ({name}) has non-object details")]
    MalformedDetails { index: usize, name: String },

    #[error("unknown tag: {0}")]
    UnknownTag(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("encoded CSV is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
