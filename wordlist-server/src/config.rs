//! Server configuration from environment variables (`.env` honoured).
//!
//!   WORDLIST_BIND_ADDR                listen address (default: 0.0.0.0:4200)
//!   WORDLIST_DATABASE_URL             Postgres connection string
//!   WORDLIST_WORDS_FILE               JSON word file for the in-memory store,
//!                                     used when no database URL is set
//!   WORDLIST_POOL_SIZE                max pool connections (default: 10)
//!   WORDLIST_DB_CONNECT_TIMEOUT_SECS  pool acquire timeout (default: 30)
//!   WORDLIST_REQUEST_TIMEOUT_SECS     per-request timeout (default: 30)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "postgres")]
use wordlist_core::store::DatabaseConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4200";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub enum StoreConfig {
    #[cfg(feature = "postgres")]
    Postgres(DatabaseConfig),
    MemoryFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub store: StoreConfig,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests need not touch the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("WORDLIST_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "WORDLIST_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));

        let store = match (lookup("WORDLIST_DATABASE_URL"), lookup("WORDLIST_WORDS_FILE")) {
            (Some(url), _) => database_store(url, &lookup)?,
            (None, Some(path)) => StoreConfig::MemoryFile(PathBuf::from(path)),
            (None, None) => anyhow::bail!(
                "no word store configured: set WORDLIST_DATABASE_URL or WORDLIST_WORDS_FILE"
            ),
        };

        Ok(Self {
            bind_addr,
            store,
            request_timeout,
        })
    }
}

#[cfg(feature = "postgres")]
fn database_store(
    url: String,
    lookup: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<StoreConfig> {
    let mut db = DatabaseConfig::new(url);
    db.max_connections = parse_or(lookup, "WORDLIST_POOL_SIZE", DEFAULT_POOL_SIZE);
    db.connection_timeout = Duration::from_secs(parse_or(
        lookup,
        "WORDLIST_DB_CONNECT_TIMEOUT_SECS",
        DEFAULT_CONNECT_TIMEOUT_SECS,
    ));
    Ok(StoreConfig::Postgres(db))
}

#[cfg(not(feature = "postgres"))]
fn database_store(
    _url: String,
    _lookup: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<StoreConfig> {
    anyhow::bail!("WORDLIST_DATABASE_URL is set but this build has no postgres support")
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{key}={raw:?} is not a valid value, using {default}");
            default
        }),
    }
}

/// Hide the password in a connection string before logging it.
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut masked = parsed.clone();
        if parsed.password().is_some() {
            let _ = masked.set_password(Some("***"));
        }
        masked.to_string()
    } else if url.chars().count() > 20 {
        // Not a URL (e.g. a key=value DSN): keep only a short prefix.
        let head: String = url.chars().take(10).collect();
        format!("{head}***")
    } else {
        "***".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn memory_store_with_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("WORDLIST_WORDS_FILE", "words.json")]))
            .unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(matches!(config.store, StoreConfig::MemoryFile(ref p) if p == &PathBuf::from("words.json")));
    }

    #[test]
    fn missing_store_is_an_error() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("no word store configured"));
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn database_url_wins_over_words_file() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WORDLIST_DATABASE_URL", "postgresql://localhost/words"),
            ("WORDLIST_WORDS_FILE", "words.json"),
            ("WORDLIST_POOL_SIZE", "4"),
        ]))
        .unwrap();
        match config.store {
            StoreConfig::Postgres(db) => {
                assert_eq!(db.database_url, "postgresql://localhost/words");
                assert_eq!(db.max_connections, 4);
            }
            other => panic!("expected postgres store, got {other:?}"),
        }
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("WORDLIST_WORDS_FILE", "words.json"),
            ("WORDLIST_REQUEST_TIMEOUT_SECS", "soon"),
            ("WORDLIST_BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn password_is_masked() {
        let masked = mask_database_url("postgresql://words:hunter2@db:5432/wordlist");
        assert!(!masked.contains("hunter2"));
        assert!(masked.contains("***"));
    }

    #[test]
    fn key_value_dsn_is_masked_on_char_boundaries() {
        let masked = mask_database_url("dbname=wxörterbuch password=secret1");
        assert_eq!(masked, "dbname=wxö***");
        assert!(!masked.contains("secret1"));

        let masked = mask_database_url("host=db dbname=wörter password=ä");
        assert!(!masked.contains("password"));
    }

    #[test]
    fn url_without_password_is_unchanged() {
        assert_eq!(
            mask_database_url("postgresql://db:5432/wordlist"),
            "postgresql://db:5432/wordlist"
        );
    }
}
