//! Domain types shared by the catalog, the resolver, the engine and the stores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One filterable numeric dimension of a word, with its domain-wide bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub min: i32,
    pub max: i32,
}

impl Attribute {
    pub fn new(name: impl Into<String>, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// The unnarrowed range covering the whole domain.
    pub fn default_range(&self) -> AttributeRange {
        AttributeRange::new(self.min, self.max)
    }
}

/// Inclusive per-request narrowing of one attribute's domain.
///
/// `min <= max` is not enforced; an inverted range matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub min: i32,
    pub max: i32,
}

impl AttributeRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// A word and its attribute values, keyed by attribute name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, i32>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: i32) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<i32> {
        self.attributes.get(name).copied()
    }
}

/// One bounded page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub words: Vec<Word>,
    /// Whether the mode produced more words than the page limit allowed.
    pub has_more: bool,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Text of the last word, i.e. the `from` cursor for the next page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.words.last().map(|w| w.text.as_str())
    }
}
