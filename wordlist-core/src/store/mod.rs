//! Storage port for the word collection.
//!
//! The engine and the catalog operate exclusively through [`WordStore`], so the
//! same logic runs against the in-memory store (tests, local dev) and
//! PostgreSQL (production).

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Attribute, AttributeRange, Word};

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryWordStore;
#[cfg(feature = "postgres")]
pub use postgres::{DatabaseConfig, PgWordStore};

/// Filter predicate forwarded to storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFilter {
    /// Case-sensitive substring the word text must contain.
    pub text: Option<String>,
    /// Attributes every matching word must carry (the whole catalog).
    pub required: Vec<String>,
    /// Narrowed ranges only; catalog defaults are implied by `required`.
    pub ranges: Vec<(String, AttributeRange)>,
}

impl WordFilter {
    pub fn matches(&self, word: &Word) -> bool {
        if let Some(text) = &self.text {
            if !word.text.contains(text.as_str()) {
                return false;
            }
        }
        if !self
            .required
            .iter()
            .all(|name| word.attributes.contains_key(name))
        {
            return false;
        }
        self.ranges.iter().all(|(name, range)| {
            word.attribute(name)
                .is_some_and(|value| range.contains(value))
        })
    }
}

/// Ordering (and starting point) of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOrder {
    /// Text ascending (byte order), strictly after the cursor when given.
    Text { after: Option<String> },
    /// Seeded rank ascending, see [`crate::sampling`].
    Sampled { seed: String },
}

/// One storage read: filter, order, then take at most `take` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordScan {
    pub filter: WordFilter,
    pub order: ScanOrder,
    pub take: usize,
}

#[async_trait]
pub trait WordStore: Send + Sync {
    /// Distinct attribute names with the min/max value seen for each.
    async fn attribute_domains(&self) -> Result<Vec<Attribute>>;

    /// Execute a scan. Failures are `WordListError::StorageUnavailable`;
    /// an empty vector always means "no matches".
    async fn find_words(&self, scan: &WordScan) -> Result<Vec<Word>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Word {
        Word::new("cat").with_attribute("length", 3)
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(WordFilter::default().matches(&cat()));
    }

    #[test]
    fn text_filter_is_case_sensitive_substring() {
        let filter = WordFilter {
            text: Some("at".into()),
            ..Default::default()
        };
        assert!(filter.matches(&cat()));

        let filter = WordFilter {
            text: Some("CAT".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&cat()));
    }

    #[test]
    fn range_filter_requires_attribute() {
        let filter = WordFilter {
            ranges: vec![("sentiment".into(), AttributeRange::new(-5, 5))],
            ..Default::default()
        };
        assert!(!filter.matches(&cat()));
    }

    #[test]
    fn range_filter_checks_bounds() {
        let inside = WordFilter {
            ranges: vec![("length".into(), AttributeRange::new(1, 5))],
            ..Default::default()
        };
        let outside = WordFilter {
            ranges: vec![("length".into(), AttributeRange::new(4, 9))],
            ..Default::default()
        };
        assert!(inside.matches(&cat()));
        assert!(!outside.matches(&cat()));
    }

    #[test]
    fn required_attributes_must_all_be_present() {
        let filter = WordFilter {
            required: vec!["length".into(), "sentiment".into()],
            ..Default::default()
        };
        let full = cat().with_attribute("sentiment", 1);
        assert!(filter.matches(&full));
        assert!(!filter.matches(&cat()));
        assert!(!filter.matches(&Word::new("bare")));
    }
}
