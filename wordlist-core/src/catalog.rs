//! Attribute catalog: the fixed, ordered set of word attributes and their
//! domains.
//!
//! Built once at startup (from the store, or from a known attribute list) and
//! shared read-only behind an `Arc` for the lifetime of the process. There is
//! no update path; a schema change needs a restart.

use crate::error::{Result, WordListError};
use crate::store::WordStore;
use crate::types::Attribute;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCatalog {
    attributes: Vec<Attribute>,
}

impl AttributeCatalog {
    /// Discover attributes from the store. Fails if the store is unreachable
    /// or reports no attributes.
    pub async fn load(store: &dyn WordStore) -> Result<Self> {
        let attributes = store.attribute_domains().await?;
        let catalog = Self::from_attributes(attributes)?;
        tracing::info!(
            "Attribute catalog loaded: {} attribute(s) [{}]",
            catalog.len(),
            catalog
                .attributes
                .iter()
                .map(|a| format!("{}={}..{}", a.name, a.min, a.max))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(catalog)
    }

    pub fn from_attributes(mut attributes: Vec<Attribute>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(WordListError::EmptyCatalog);
        }

        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = attributes.windows(2).find(|p| p[0].name == p[1].name) {
            return Err(WordListError::InvalidData(format!(
                "duplicate attribute '{}'",
                pair[0].name
            )));
        }

        Ok(Self { attributes })
    }

    /// All attributes, ordered by name ascending.
    pub fn all_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .binary_search_by(|a| a.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.attributes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
