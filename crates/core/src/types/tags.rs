//! Normalized tag sets for product labels and allergy declarations.
//!
//! Tags are written as comma-separated free text (`"Gluten, Dairy"`) or as a
//! list. Either way each token is trimmed and lower-cased, blanks are dropped,
//! and duplicates collapse onto their first occurrence. Insertion order is
//! kept so that "first match" questions have a deterministic answer.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An insertion-ordered set of normalized tags.
///
/// ```rust
/// use marmita_core::TagSet;
///
/// let product = TagSet::parse("Gluten, Dairy");
/// let allergies = TagSet::parse("peanut,gluten");
/// assert_eq!(allergies.first_shared_with(&product), Some("gluten"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "TagSource", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// An empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse comma-separated free text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        text.split(',').collect()
    }

    /// Normalize a single token: trimmed and lower-cased.
    #[must_use]
    pub fn normalize(tag: &str) -> String {
        tag.trim().to_lowercase()
    }

    /// Insert a tag, normalizing it first.
    ///
    /// Returns `false` if the tag was blank or already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = Self::normalize(tag);
        if tag.is_empty() || self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Returns `true` if the set holds the tag (compared after normalization).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = Self::normalize(tag);
        self.0.contains(&tag)
    }

    /// The first tag of `self`, in insertion order, that `other` also holds.
    ///
    /// Matching is exact-token; `"nut"` does not match `"peanut"`.
    #[must_use]
    pub fn first_shared_with(&self, other: &Self) -> Option<&str> {
        self.0
            .iter()
            .find(|tag| other.0.contains(tag))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

/// Joined with `", "`, the same shape `parse` accepts.
impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl From<TagSet> for Vec<String> {
    fn from(tags: TagSet) -> Self {
        tags.0
    }
}

/// Accepted wire shapes: `"a, b"` or `["a", "b"]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagSource {
    Text(String),
    List(Vec<String>),
}

impl From<TagSource> for TagSet {
    fn from(source: TagSource) -> Self {
        match source {
            TagSource::Text(text) => Self::parse(&text),
            TagSource::List(list) => list.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_lowercases_and_dedups() {
        let tags = TagSet::parse(" Gluten ,DAIRY, gluten,, ");
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["gluten", "dairy"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(TagSet::parse("").is_empty());
        assert!(TagSet::parse(" , ,").is_empty());
    }

    #[test]
    fn test_first_shared_follows_receiver_order() {
        let allergies = TagSet::parse("dairy, gluten");
        let product = TagSet::parse("Gluten, Dairy");
        assert_eq!(allergies.first_shared_with(&product), Some("dairy"));

        let allergies = TagSet::parse("gluten, dairy");
        assert_eq!(allergies.first_shared_with(&product), Some("gluten"));
    }

    #[test]
    fn test_first_shared_is_exact_token() {
        let allergies = TagSet::parse("nut");
        let product = TagSet::parse("peanut, protein");
        assert_eq!(allergies.first_shared_with(&product), None);
    }

    #[test]
    fn test_contains_normalizes_query() {
        let tags = TagSet::parse("peanut");
        assert!(tags.contains("  PEANUT "));
        assert!(!tags.contains("pea"));
    }

    #[test]
    fn test_deserialize_from_text_or_list() {
        let from_text: TagSet = serde_json::from_str("\"Peanut, protein\"").unwrap();
        let from_list: TagSet = serde_json::from_str("[\"peanut\", \" Protein\"]").unwrap();
        assert_eq!(from_text, from_list);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "[\"peanut\",\"protein\"]");
    }

    #[test]
    fn test_display_joins_with_comma() {
        assert_eq!(TagSet::parse("vegan,Low-Carb").to_string(), "vegan, low-carb");
    }
}
