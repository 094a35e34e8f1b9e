//! Record, row and column types shared by the export pipeline

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Column that carries the product name in every row.
pub const NAME_COLUMN: &str = "Name";

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Text written into a CSV cell. `Null` renders as the empty string.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed(""),
            Scalar::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Scalar::Number(n) => Cow::Owned(n.to_string()),
            Scalar::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl From<Value> for Scalar {
    /// Nested arrays and objects are kept as their compact JSON text.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(b),
            Value::Number(n) => Scalar::Number(n),
            Value::String(s) => Scalar::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Scalar::Text(nested.to_string()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// One scraped item as decoded from JSON: `{ "<product name>": { ...details } }`.
///
/// The single-key shape is not checked here; the normalizer validates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrapedRecord(Map<String, Value>);

impl ScrapedRecord {
    /// Top-level entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

/// Flattened record: `Name` plus every detail field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: BTreeMap<String, Scalar>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any earlier value for the same column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.cells.get(column)
    }

    pub fn name(&self) -> Option<&Scalar> {
        self.get(NAME_COLUMN)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Insertion-ordered set of column names.
///
/// Order is first-seen order across the batch and becomes the header order,
/// so it is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column` unless already present. Returns true if it was added.
    pub fn insert(&mut self, column: &str) -> bool {
        if self.seen.contains(column) {
            return false;
        }
        self.seen.insert(column.to_string());
        self.order.push(column.to_string());
        true
    }

    pub fn contains(&self, column: &str) -> bool {
        self.seen.contains(column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ColumnSet::new();
        for column in iter {
            set.insert(column.as_ref());
        }
        set
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// User-selectable export category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Name,
    Link,
    Description,
    Price,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Name, Tag::Link, Tag::Description, Tag::Price];

    /// Lowercase id used for matching.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Name => "name",
            Tag::Link => "link",
            Tag::Description => "description",
            Tag::Price => "price",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tag::Name => "Name",
            Tag::Link => "Link",
            Tag::Description => "Description",
            Tag::Price => "Price",
        }
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExportError::UnknownTag(s.to_string()))
    }
}

/// Target language forwarded to the scraping service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Spanish,
    Japanese,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Spanish,
        Language::Japanese,
        Language::French,
        Language::German,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Spanish => "spanish",
            Language::Japanese => "japanese",
            Language::French => "french",
            Language::German => "german",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ExportError::UnknownLanguage(s.to_string()))
    }
}
