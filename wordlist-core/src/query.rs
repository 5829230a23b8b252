//! Query resolution: raw request parameters to a typed [`QuerySpecification`].
//!
//! Parameter names are derived from the catalog (`{attribute}Min`,
//! `{attribute}Max`) rather than read off the input, so unknown names are
//! never looked at. Resolution never fails. A present but non-numeric value
//! resolves to `0`, never to a default; an absent value takes the default.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::catalog::AttributeCatalog;
use crate::types::AttributeRange;

pub const DEFAULT_LIMIT: usize = 100;

pub const TEXT_PARAM: &str = "text";
pub const FROM_PARAM: &str = "from";
pub const RANDOM_SEED_PARAM: &str = "randomSeed";
pub const RANDOM_COUNT_PARAM: &str = "randomCount";
pub const LIMIT_PARAM: &str = "limit";

const MIN_SUFFIX: &str = "Min";
const MAX_SUFFIX: &str = "Max";

/// Normalized description of one request. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpecification {
    pub text: Option<String>,
    /// Only ranges narrower than (different from) the catalog domain.
    pub ranges: BTreeMap<String, AttributeRange>,
    /// Last-seen word text; results resume strictly after it.
    pub cursor: Option<String>,
    pub random_seed: Option<String>,
    pub random_count: usize,
    pub limit: usize,
}

impl Default for QuerySpecification {
    fn default() -> Self {
        Self {
            text: None,
            ranges: BTreeMap::new(),
            cursor: None,
            random_seed: None,
            random_count: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QuerySpecification {
    pub fn is_random_sample(&self) -> bool {
        self.random_count > 0
    }
}

/// Parse the way the public API promises: surrounding whitespace and a sign
/// are accepted, anything else (including overflow) is `0`.
fn parse_int(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_count(raw: &str) -> usize {
    usize::try_from(parse_int(raw)).unwrap_or(0)
}

pub struct QueryParameterResolver {
    catalog: Arc<AttributeCatalog>,
}

impl QueryParameterResolver {
    pub fn new(catalog: Arc<AttributeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    pub fn resolve(&self, params: &HashMap<String, String>) -> QuerySpecification {
        let int_param = |name: &str| params.get(name).map(|v| parse_int(v));
        let string_param = |name: &str| params.get(name).cloned();

        let mut ranges = BTreeMap::new();
        for attr in self.catalog.all_attributes() {
            let min = int_param(&format!("{}{MIN_SUFFIX}", attr.name)).unwrap_or(attr.min);
            let max = int_param(&format!("{}{MAX_SUFFIX}", attr.name)).unwrap_or(attr.max);

            let range = AttributeRange::new(min, max);
            if range != attr.default_range() {
                ranges.insert(attr.name.clone(), range);
            }
        }

        QuerySpecification {
            text: string_param(TEXT_PARAM),
            ranges,
            cursor: string_param(FROM_PARAM),
            random_seed: string_param(RANDOM_SEED_PARAM),
            random_count: params
                .get(RANDOM_COUNT_PARAM)
                .map(|v| parse_count(v))
                .unwrap_or(0),
            limit: params
                .get(LIMIT_PARAM)
                .map(|v| parse_count(v))
                .unwrap_or(DEFAULT_LIMIT),
        }
    }
}
