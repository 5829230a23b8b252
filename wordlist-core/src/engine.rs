//! WordQueryEngine: resolves a [`QuerySpecification`] into a [`ResultPage`].
//!
//! Order of operations:
//! 1. base filter (text substring + narrowed attribute ranges)
//! 2. mode: seeded random sample when `random_count > 0`, otherwise text
//!    order resumed strictly after the cursor
//! 3. truncate to `limit`
//!
//! Storage is asked for one row past the page so `has_more` can be reported;
//! the page itself never exceeds `limit`.

use std::sync::Arc;

use crate::catalog::AttributeCatalog;
use crate::error::Result;
use crate::query::QuerySpecification;
use crate::sampling::DEFAULT_RANDOM_SEED;
use crate::store::{ScanOrder, WordFilter, WordScan, WordStore};
use crate::types::ResultPage;

pub struct WordQueryEngine {
    catalog: Arc<AttributeCatalog>,
    store: Arc<dyn WordStore>,
}

impl WordQueryEngine {
    pub fn new(catalog: Arc<AttributeCatalog>, store: Arc<dyn WordStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub async fn find_words(&self, spec: &QuerySpecification) -> Result<ResultPage> {
        let Some(scan) = self.plan(spec) else {
            tracing::debug!("query matches nothing, skipping storage");
            return Ok(ResultPage::empty());
        };

        let mut words = self.store.find_words(&scan).await?;

        let has_more = words.len() > spec.limit;
        words.truncate(spec.limit);

        tracing::debug!(
            returned = words.len(),
            has_more,
            random = spec.is_random_sample(),
            "find_words"
        );
        Ok(ResultPage { words, has_more })
    }

    /// Build the storage scan, or `None` when the result is empty by
    /// construction (zero limit, or an inverted range).
    fn plan(&self, spec: &QuerySpecification) -> Option<WordScan> {
        if spec.limit == 0 {
            return None;
        }

        let mut ranges = Vec::with_capacity(spec.ranges.len());
        for (name, range) in &spec.ranges {
            if !self.catalog.contains(name) {
                tracing::warn!("ignoring range for unknown attribute '{name}'");
                continue;
            }
            if range.is_empty() {
                return None;
            }
            ranges.push((name.clone(), *range));
        }

        let filter = WordFilter {
            text: spec.text.clone(),
            required: self
                .catalog
                .all_attributes()
                .iter()
                .map(|attr| attr.name.clone())
                .collect(),
            ranges,
        };
        // One past the page to detect has_more.
        let lookahead = spec.limit.saturating_add(1);

        let (order, take) = if spec.is_random_sample() {
            let seed = spec
                .random_seed
                .clone()
                .unwrap_or_else(|| DEFAULT_RANDOM_SEED.to_string());
            (ScanOrder::Sampled { seed }, spec.random_count.min(lookahead))
        } else {
            let after = spec.cursor.clone();
            (ScanOrder::Text { after }, lookahead)
        };

        Some(WordScan {
            filter,
            order,
            take,
        })
    }
}
