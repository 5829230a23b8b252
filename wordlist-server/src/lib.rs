//! wordlist-server: HTTP front end for [`wordlist_core`].
//!
//! Routes:
//!   GET /api/words      : filtered / paged / sampled words
//!   GET /api/attributes : attribute catalog
//!   GET /health         : liveness

use std::sync::Arc;

use wordlist_core::store::MemoryWordStore;
use wordlist_core::{AttributeCatalog, QueryParameterResolver, WordQueryEngine, WordStore};

use crate::config::StoreConfig;

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

/// Shared, read-only request dependencies.
#[derive(Clone)]
pub struct Services {
    pub resolver: Arc<QueryParameterResolver>,
    pub engine: Arc<WordQueryEngine>,
}

impl Services {
    pub fn new(catalog: Arc<AttributeCatalog>, store: Arc<dyn WordStore>) -> Self {
        Self {
            resolver: Arc::new(QueryParameterResolver::new(catalog.clone())),
            engine: Arc::new(WordQueryEngine::new(catalog, store)),
        }
    }

    /// Load the attribute catalog from `store` and wire the engine over it.
    /// An unreachable store or an empty catalog is an error; the server must
    /// not start without a catalog.
    pub async fn load(store: Arc<dyn WordStore>) -> wordlist_core::Result<Self> {
        let catalog = AttributeCatalog::load(store.as_ref()).await?;
        Ok(Self::new(Arc::new(catalog), store))
    }
}

/// Open the configured backing store.
pub async fn open_store(config: &StoreConfig) -> wordlist_core::Result<Arc<dyn WordStore>> {
    match config {
        #[cfg(feature = "postgres")]
        StoreConfig::Postgres(db) => {
            tracing::info!(
                "connecting to {}",
                crate::config::mask_database_url(&db.database_url)
            );
            let store = wordlist_core::store::PgWordStore::connect(db).await?;
            Ok(Arc::new(store))
        }
        StoreConfig::MemoryFile(path) => {
            let store = MemoryWordStore::from_json_file(path)?;
            Ok(Arc::new(store))
        }
    }
}
