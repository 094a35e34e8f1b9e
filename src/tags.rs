//! Tag resolution: map coarse user tags onto concrete column names

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{ColumnSet, Tag};

/// How a tag token is compared against a column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Lowercased column contains the token anywhere.
    ///
    /// Loose on purpose: `price` selects `unit_price`, but `name` also
    /// selects `username`.
    #[default]
    Substring,
    /// Lowercased column, split on non-alphanumerics, has a segment equal to
    /// the token. `price` selects `unit_price`; `name` does not select `username`.
    Word,
}

impl MatchMode {
    fn matches(self, column: &str, token: &str) -> bool {
        match self {
            MatchMode::Substring => column.contains(token),
            MatchMode::Word => column
                .split(|c: char| !c.is_alphanumeric())
                .any(|segment| segment == token),
        }
    }
}

/// Join the labels with ", ", lowercase, and split on commas and whitespace.
/// Empty tokens are dropped so stray separators never match every column.
pub fn tokenize<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = labels
        .into_iter()
        .map(|label| label.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
        .to_lowercase();

    joined
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Columns that match at least one token from `tags`, in `columns` order.
///
/// Selection order never follows tag order. No match (or an empty column set)
/// gives an empty selection, which is still encodable.
pub fn resolve<I, S>(columns: &ColumnSet, tags: I, mode: MatchMode) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens = tokenize(tags);

    let selected: Vec<String> = columns
        .iter()
        .filter(|column| {
            let lower = column.to_lowercase();
            tokens.iter().any(|token| mode.matches(&lower, token))
        })
        .cloned()
        .collect();

    debug!(
        ?tokens,
        ?mode,
        available = columns.len(),
        selected = selected.len(),
        "resolved tags"
    );
    selected
}

/// Active tag selection as driven by checkboxes.
///
/// Starts with `name` selected and never lets it go; other tags keep the
/// order in which they were switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl Default for TagSet {
    fn default() -> Self {
        Self {
            tags: vec![Tag::Name],
        }
    }
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn select(&mut self, tag: Tag) {
        if !self.contains(tag) {
            self.tags.push(tag);
        }
    }

    /// Deselect `tag`. `Tag::Name` stays selected.
    pub fn deselect(&mut self, tag: Tag) {
        if tag == Tag::Name {
            return;
        }
        self.tags.retain(|t| *t != tag);
    }

    /// Flip `tag` and return whether it is selected afterwards.
    pub fn toggle(&mut self, tag: Tag) -> bool {
        if self.contains(tag) {
            self.deselect(tag);
        } else {
            self.select(tag);
        }
        self.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tags.iter().copied()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.iter().map(|tag| tag.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<Tag> for TagSet {
    /// `name` is always included, first.
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.select(tag);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> ColumnSet {
        names.iter().collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize(["name", "price"]), vec!["name", "price"]);
        assert_eq!(tokenize(["Name, Link", " price "]), vec!["name", "link", "price"]);
        assert!(tokenize(Vec::<String>::new()).is_empty());
        assert!(tokenize([",", "  "]).is_empty());
    }

    #[test]
    fn test_resolve_substring_is_case_insensitive() {
        let cols = columns(&["Name", "Description", "product_description", "unit_price", "link"]);
        assert_eq!(
            resolve(&cols, ["name", "description", "price"], MatchMode::Substring),
            vec!["Name", "Description", "product_description", "unit_price"]
        );
    }

    #[test]
    fn test_resolve_keeps_column_order_not_tag_order() {
        let cols = columns(&["Name", "price", "link"]);
        assert_eq!(
            resolve(&cols, [Tag::Link, Tag::Price, Tag::Name], MatchMode::Substring),
            vec!["Name", "price", "link"]
        );
    }

    #[test]
    fn test_resolve_substring_false_positive() {
        let cols = columns(&["Name", "username"]);
        assert_eq!(
            resolve(&cols, ["name"], MatchMode::Substring),
            vec!["Name", "username"]
        );
        assert_eq!(resolve(&cols, ["name"], MatchMode::Word), vec!["Name"]);
    }

    #[test]
    fn test_resolve_word_mode_splits_on_separators() {
        let cols = columns(&["Name", "unit_price", "Price (USD)", "priceless"]);
        assert_eq!(
            resolve(&cols, ["price"], MatchMode::Word),
            vec!["unit_price", "Price (USD)"]
        );
    }

    #[test]
    fn test_resolve_no_match_and_empty_columns() {
        let cols = columns(&["Name", "price"]);
        assert!(resolve(&cols, ["link"], MatchMode::Substring).is_empty());
        assert!(resolve(&ColumnSet::new(), ["name"], MatchMode::Substring).is_empty());
        assert!(resolve(&cols, Vec::<&str>::new(), MatchMode::Substring).is_empty());
    }

    #[test]
    fn test_tag_set_name_is_permanent() {
        let mut tags = TagSet::new();
        assert_eq!(tags.labels(), vec!["name"]);

        assert!(tags.toggle(Tag::Price));
        assert!(tags.toggle(Tag::Link));
        assert!(tags.toggle(Tag::Name));
        tags.deselect(Tag::Name);
        assert_eq!(tags.labels(), vec!["name", "price", "link"]);

        assert!(!tags.toggle(Tag::Price));
        assert_eq!(tags.labels(), vec!["name", "link"]);
    }

    #[test]
    fn test_tag_set_from_iter_dedups() {
        let tags: TagSet = [Tag::Price, Tag::Price, Tag::Description].into_iter().collect();
        assert_eq!(tags.labels(), vec!["name", "price", "description"]);
        assert_eq!(tags.len(), 3);
    }
}
