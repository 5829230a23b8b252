//! GET /api/words: filtered, paged or sampled word lookup.
//!
//! Every query parameter is optional and none is ever rejected; see
//! [`QueryParameterResolver`] for how raw values are interpreted. Whether
//! more rows follow the page is reported in the `x-has-more` header so the
//! body stays a plain array.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::Query;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;
use wordlist_core::{QueryParameterResolver, Word, WordQueryEngine};

use crate::error::AppError;

pub const HAS_MORE_HEADER: &str = "x-has-more";

#[derive(Debug, Serialize)]
pub struct WordDto {
    pub text: String,
    /// Part-of-speech tags. Not modelled yet, always empty.
    pub types: Vec<String>,
    pub attributes: BTreeMap<String, i32>,
}

impl From<Word> for WordDto {
    fn from(word: Word) -> Self {
        Self {
            text: word.text,
            types: Vec::new(),
            attributes: word.attributes,
        }
    }
}

pub async fn find_words(
    Extension(resolver): Extension<Arc<QueryParameterResolver>>,
    Extension(engine): Extension<Arc<WordQueryEngine>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let spec = resolver.resolve(&params);
    let page = engine.find_words(&spec).await?;

    let has_more = if page.has_more { "true" } else { "false" };
    let body: Vec<WordDto> = page.words.into_iter().map(WordDto::from).collect();
    Ok(([(HAS_MORE_HEADER, has_more)], Json(body)))
}
