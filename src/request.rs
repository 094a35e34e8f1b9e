//! Wire shapes exchanged with the remote scraping service
//!
//! The HTTP call itself lives with the caller; these types only fix the JSON
//! that goes out and comes back.

use serde::{Deserialize, Serialize};

use crate::types::{Language, ScrapedRecord};

/// Body posted to the scraping endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: Vec<String>,
    /// Selected language ids joined with ", " into a single entry.
    pub languages: Vec<String>,
}

impl ScrapeRequest {
    /// Build a request from the comma-separated link box and the language picks.
    pub fn new(input: &str, languages: &[Language]) -> Self {
        let url = input
            .split(',')
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .map(str::to_string)
            .collect();

        let joined = languages
            .iter()
            .map(|lang| lang.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            url,
            languages: vec![joined],
        }
    }
}

/// Scraping service response
///
/// `json` is required and unknown keys are refused, so a stray object never
/// decodes as an empty batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeResponse {
    /// Product records, one product name per record.
    pub json: Vec<ScrapedRecord>,
    /// Narrative (markdown) output, passed through untouched.
    #[serde(default)]
    pub data: String,
}

/// Either a full service response or a bare array of records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordsInput {
    Response(ScrapeResponse),
    Records(Vec<ScrapedRecord>),
}

impl RecordsInput {
    pub fn into_records(self) -> Vec<ScrapedRecord> {
        match self {
            RecordsInput::Response(response) => response.json,
            RecordsInput::Records(records) => records,
        }
    }
}
