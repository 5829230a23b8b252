//! Seeded ranking for random-sample mode.
//!
//! A word's rank is `SHA-256(seed || text)`, compared bytewise. The key depends
//! only on the seed and the word, never on storage iteration order, so every
//! backend yields the same sample in the same order. PostgreSQL computes the
//! same key with `sha256(convert_to($seed || text, 'UTF8'))`.

use std::cmp::Ordering;

use sha2::{Digest, Sha256};

/// Seed used when the caller supplies none, so retries stay reproducible.
pub const DEFAULT_RANDOM_SEED: &str = "";

pub type RankKey = [u8; 32];

pub fn rank_key(seed: &str, text: &str) -> RankKey {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

/// Sampling order: rank key ascending, text ascending on (astronomically
/// unlikely) key ties.
pub fn compare_ranked(a: &(RankKey, &str), b: &(RankKey, &str)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
