//! Query parsing: raw text into plus, minus and stop word sets.

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
    pub stop_words: BTreeSet<String>,
}

impl Query {
    /// A query made only of stop-words matches nothing.
    pub fn is_stop_only(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty() && !self.stop_words.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(word: &'a str, stop_words: &BTreeSet<String>) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::bad_argument(format!("malformed query word {word:?}")));
    }
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

pub fn parse_query(text: &str, stop_words: &BTreeSet<String>) -> Result<Query> {
    if !is_valid_word(text) {
        return Err(SearchError::bad_argument("query contains control characters"));
    }
    if text.is_empty() {
        return Err(SearchError::bad_argument("query is empty"));
    }
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word, stop_words)?;
        let target = if word.is_stop {
            &mut query.stop_words
        } else if word.is_minus {
            &mut query.minus_words
        } else {
            &mut query.plus_words
        };
        target.insert(word.data.to_string());
    }
    Ok(query)
}
