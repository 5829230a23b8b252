//! In-memory word store.
//!
//! Holds an immutable word list sorted by text. Used by tests and for running
//! the server locally against a JSON word file.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::{ScanOrder, WordScan, WordStore};
use crate::error::{Result, WordListError};
use crate::sampling::{compare_ranked, rank_key};
use crate::types::{Attribute, Word};

pub struct MemoryWordStore {
    words: Vec<Word>,
    unavailable: AtomicBool,
}

impl MemoryWordStore {
    /// Build a store from words. Later duplicates of a text replace earlier ones.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let by_text: BTreeMap<String, Word> = words
            .into_iter()
            .map(|w| (w.text.clone(), w))
            .collect();
        Self {
            words: by_text.into_values().collect(),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Load a JSON array of `{ "text": ..., "attributes": { ... } }`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            WordListError::storage(anyhow::anyhow!("reading {}: {e}", path.display()))
        })?;
        let words: Vec<Word> = serde_json::from_str(&raw).map_err(|e| {
            WordListError::InvalidData(format!("parsing {}: {e}", path.display()))
        })?;
        tracing::info!("Loaded {} words from {}", words.len(), path.display());
        Ok(Self::from_words(words))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Simulate backend outage for testing error propagation.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(WordListError::storage(anyhow::anyhow!(
                "simulated outage"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn attribute_domains(&self) -> Result<Vec<Attribute>> {
        self.check_available()?;

        let mut domains: BTreeMap<&str, (i32, i32)> = BTreeMap::new();
        for word in &self.words {
            for (name, &value) in &word.attributes {
                match domains.entry(name.as_str()) {
                    Entry::Vacant(slot) => {
                        slot.insert((value, value));
                    }
                    Entry::Occupied(mut slot) => {
                        let (min, max) = slot.get_mut();
                        *min = (*min).min(value);
                        *max = (*max).max(value);
                    }
                }
            }
        }

        Ok(domains
            .into_iter()
            .map(|(name, (min, max))| Attribute::new(name, min, max))
            .collect())
    }

    async fn find_words(&self, scan: &WordScan) -> Result<Vec<Word>> {
        self.check_available()?;

        let matching = self.words.iter().filter(|w| scan.filter.matches(w));

        let words = match &scan.order {
            ScanOrder::Text { after } => matching
                .skip_while(|w| after.as_deref().is_some_and(|c| w.text.as_str() <= c))
                .take(scan.take)
                .cloned()
                .collect(),
            ScanOrder::Sampled { seed } => {
                let mut ranked: Vec<_> = matching
                    .map(|w| ((rank_key(seed, &w.text), w.text.as_str()), w))
                    .collect();
                ranked.sort_by(|a, b| compare_ranked(&a.0, &b.0));
                ranked
                    .into_iter()
                    .take(scan.take)
                    .map(|(_, w)| w.clone())
                    .collect()
            }
        };

        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WordFilter;
    use crate::types::AttributeRange;

    fn store() -> MemoryWordStore {
        MemoryWordStore::from_words(vec![
            Word::new("dog").with_attribute("length", 3).with_attribute("sentiment", 2),
            Word::new("cat").with_attribute("length", 3).with_attribute("sentiment", 1),
            Word::new("elephant")
                .with_attribute("length", 8)
                .with_attribute("sentiment", -1),
            Word::new("ant").with_attribute("length", 3).with_attribute("sentiment", 0),
        ])
    }

    fn text_scan(after: Option<&str>, take: usize) -> WordScan {
        WordScan {
            filter: WordFilter::default(),
            order: ScanOrder::Text {
                after: after.map(String::from),
            },
            take,
        }
    }

    fn texts(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    #[tokio::test]
    async fn domains_are_min_max_per_attribute() {
        let domains = store().attribute_domains().await.unwrap();
        assert_eq!(
            domains,
            vec![
                Attribute::new("length", 3, 8),
                Attribute::new("sentiment", -1, 2),
            ]
        );
    }

    #[tokio::test]
    async fn text_scan_is_sorted() {
        let words = store().find_words(&text_scan(None, 10)).await.unwrap();
        assert_eq!(texts(&words), vec!["ant", "cat", "dog", "elephant"]);
    }

    #[tokio::test]
    async fn text_scan_starts_after_cursor() {
        let s = store();
        let words = s.find_words(&text_scan(Some("cat"), 10)).await.unwrap();
        assert_eq!(texts(&words), vec!["dog", "elephant"]);

        // A cursor that is not itself a word still resumes correctly.
        let words = s.find_words(&text_scan(Some("b"), 1)).await.unwrap();
        assert_eq!(texts(&words), vec!["cat"]);
    }

    #[tokio::test]
    async fn text_scan_respects_take() {
        let words = store().find_words(&text_scan(None, 2)).await.unwrap();
        assert_eq!(texts(&words), vec!["ant", "cat"]);
    }

    #[tokio::test]
    async fn sampled_scan_follows_rank_order() {
        let scan = WordScan {
            filter: WordFilter::default(),
            order: ScanOrder::Sampled { seed: "abc".into() },
            take: 4,
        };
        let words = store().find_words(&scan).await.unwrap();

        let mut expected = vec!["ant", "cat", "dog", "elephant"];
        expected.sort_by_key(|t| rank_key("abc", t));
        assert_eq!(texts(&words), expected);
    }

    #[tokio::test]
    async fn sampled_scan_applies_filter_first() {
        let scan = WordScan {
            filter: WordFilter {
                ranges: vec![("length".into(), AttributeRange::new(3, 3))],
                ..Default::default()
            },
            order: ScanOrder::Sampled { seed: "x".into() },
            take: 10,
        };
        let words = store().find_words(&scan).await.unwrap();
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| w.attribute("length") == Some(3)));
    }

    #[tokio::test]
    async fn duplicate_texts_keep_last() {
        let s = MemoryWordStore::from_words(vec![
            Word::new("cat").with_attribute("length", 1),
            Word::new("cat").with_attribute("length", 3),
        ]);
        assert_eq!(s.len(), 1);
        let words = s.find_words(&text_scan(None, 10)).await.unwrap();
        assert_eq!(words[0].attribute("length"), Some(3));
    }

    #[tokio::test]
    async fn outage_is_an_error_not_an_empty_result() {
        let s = store();
        s.set_unavailable(true);
        let err = s.find_words(&text_scan(None, 10)).await.unwrap_err();
        assert!(err.is_transient());
        assert!(s.attribute_domains().await.is_err());

        s.set_unavailable(false);
        assert_eq!(s.find_words(&text_scan(None, 10)).await.unwrap().len(), 4);
    }

    #[test]
    fn loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(
            &path,
            r#"[{"text":"cat","attributes":{"length":3}},{"text":"dog","attributes":{"length":3}}]"#,
        )
        .unwrap();

        let s = MemoryWordStore::from_json_file(&path).unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn malformed_json_file_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = MemoryWordStore::from_json_file(&path).err().unwrap();
        assert!(matches!(err, WordListError::InvalidData(_)));
    }

    #[test]
    fn missing_json_file_is_storage_error() {
        let err = MemoryWordStore::from_json_file("/nonexistent/words.json")
            .err()
            .unwrap();
        assert!(err.is_transient());
    }
}
