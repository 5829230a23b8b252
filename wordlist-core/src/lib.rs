//! wordlist-core: query resolution and sampling over an attribute-tagged word
//! collection.
//!
//! ```text
//! raw params ──► QueryParameterResolver ──► QuerySpecification
//!                        │ (AttributeCatalog)          │
//!                        ▼                             ▼
//!                 AttributeCatalog ◄──────── WordQueryEngine ──► WordStore
//! ```
//!
//! The catalog is loaded once from the store at startup and shared read-only.
//! Storage sits behind the [`store::WordStore`] port: `MemoryWordStore` for
//! tests and local runs, `PgWordStore` (feature `postgres`) for production.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod query;
pub mod sampling;
pub mod store;
pub mod types;

pub use catalog::AttributeCatalog;
pub use engine::WordQueryEngine;
pub use error::{Result, WordListError};
pub use query::{QueryParameterResolver, QuerySpecification, DEFAULT_LIMIT};
pub use store::{MemoryWordStore, WordStore};
pub use types::{Attribute, AttributeRange, ResultPage, Word};
