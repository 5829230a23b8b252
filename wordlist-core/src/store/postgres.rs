//! PostgreSQL word store.
//!
//! Words live in a single table (see `migrations/001_words.sql`):
//!
//! ```sql
//! CREATE TABLE words (text TEXT PRIMARY KEY, attributes JSONB NOT NULL);
//! ```
//!
//! All SQL is runtime-checked (`sqlx::query_as`, `QueryBuilder`) so building
//! does not need a database. Text comparisons use `COLLATE "C"` to match the
//! byte ordering the engine and the in-memory store use.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{ScanOrder, WordScan, WordStore};
use crate::error::{Result, WordListError};
use crate::types::{Attribute, Word};

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

#[derive(sqlx::FromRow)]
struct PgWordRow {
    text: String,
    attributes: Json<BTreeMap<String, i32>>,
}

impl From<PgWordRow> for Word {
    fn from(row: PgWordRow) -> Self {
        Word {
            text: row.text,
            attributes: row.attributes.0,
        }
    }
}

pub struct PgWordStore {
    pool: PgPool,
}

impl PgWordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool with the given settings. Fails when the database is
    /// unreachable within `connection_timeout`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connection_timeout);

        if let Some(idle_timeout) = config.idle_timeout {
            options = options.idle_timeout(idle_timeout);
        }
        if let Some(max_lifetime) = config.max_lifetime {
            options = options.max_lifetime(max_lifetime);
        }

        let pool = options
            .connect(&config.database_url)
            .await
            .map_err(WordListError::storage)?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_sqlx(err: sqlx::Error) -> WordListError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            WordListError::InvalidData(err.to_string())
        }
        sqlx::Error::Database(ref db) if is_data_exception(db.code().as_deref()) => {
            WordListError::InvalidData(err.to_string())
        }
        other => WordListError::storage(other),
    }
}

/// SQLSTATE class 22 (data exception), e.g. `22P02` when a stored attribute
/// value does not cast to `int`. Retrying cannot fix these.
fn is_data_exception(code: Option<&str>) -> bool {
    code.is_some_and(|c| c.starts_with("22"))
}

/// Build the scan query. Every value (including attribute names, which come
/// from data) is bound, never interpolated.
fn build_scan_query(scan: &WordScan) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT text, attributes FROM words WHERE TRUE");

    if let Some(text) = &scan.filter.text {
        qb.push(" AND strpos(text, ")
            .push_bind(text.as_str())
            .push(") > 0");
    }

    if !scan.filter.required.is_empty() {
        qb.push(" AND attributes ?& ")
            .push_bind(scan.filter.required.as_slice());
    }

    for (name, range) in &scan.filter.ranges {
        qb.push(" AND (attributes ->> ")
            .push_bind(name.as_str())
            .push(")::int BETWEEN ")
            .push_bind(range.min)
            .push(" AND ")
            .push_bind(range.max);
    }

    match &scan.order {
        ScanOrder::Text { after } => {
            if let Some(cursor) = after {
                qb.push(r#" AND text COLLATE "C" > "#)
                    .push_bind(cursor.as_str());
            }
            qb.push(r#" ORDER BY text COLLATE "C" ASC"#);
        }
        ScanOrder::Sampled { seed } => {
            qb.push(" ORDER BY sha256(convert_to(")
                .push_bind(seed.as_str())
                .push(r#" || text, 'UTF8')) ASC, text COLLATE "C" ASC"#);
        }
    }

    qb.push(" LIMIT ")
        .push_bind(i64::try_from(scan.take).unwrap_or(i64::MAX));
    qb
}

#[async_trait]
impl WordStore for PgWordStore {
    async fn attribute_domains(&self) -> Result<Vec<Attribute>> {
        let rows = sqlx::query_as::<_, (String, i32, i32)>(
            r#"
            SELECT attr.key, MIN(attr.value::int), MAX(attr.value::int)
            FROM words, jsonb_each_text(words.attributes) AS attr
            GROUP BY attr.key
            ORDER BY attr.key
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows
            .into_iter()
            .map(|(name, min, max)| Attribute::new(name, min, max))
            .collect())
    }

    async fn find_words(&self, scan: &WordScan) -> Result<Vec<Word>> {
        let mut qb = build_scan_query(scan);
        tracing::debug!(sql = qb.sql(), "word scan");

        let rows: Vec<PgWordRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(rows.into_iter().map(Word::from).collect())
    }
}
