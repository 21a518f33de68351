//! The search engine: document ingestion, ranked search and per-document matching.
//!
//! Documents are appended, never removed. Queries are pure reads. Relevance
//! is TF-IDF over the whole corpus; minus-words exclude a document outright.

use crate::document::{compute_average_rating, Document, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{parse_query, Query};
use crate::tokenizer::{is_valid_word, split_into_words, unique_non_empty_strings};
use crate::{DocId, EPSILON, MAX_RESULT_DOCUMENT_COUNT};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: BTreeSet<String>,
    index: InvertedIndex,
    documents: HashMap<DocId, DocumentData>,
    ids: Vec<DocId>,
}

impl SearchServer {
    /// Build an engine from candidate stop-words. Empty candidates are dropped
    /// and duplicates collapse; any other invalid candidate is rejected.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = unique_non_empty_strings(stop_words);
        if let Some(bad) = stop_words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::bad_argument(format!("invalid stop-word {bad:?}")));
        }
        Ok(Self { stop_words, ..Self::default() })
    }

    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn stop_words(&self) -> &BTreeSet<String> { &self.stop_words }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn document_count(&self) -> usize { self.documents.len() }

    /// Id of the document added at `index`, counting in insertion order.
    pub fn document_id(&self, index: i64) -> Result<DocId> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.ids.get(i).copied())
            .ok_or_else(|| {
                SearchError::out_of_range(format!("document index {index} outside 0..{}", self.ids.len()))
            })
    }

    /// Ids in insertion order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.ids.iter().copied() }

    pub fn add_document(&mut self, document_id: DocId, document: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::bad_argument(format!("document id {document_id} is negative")));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::bad_argument(format!("document id {document_id} already exists")));
        }
        let words = self.split_into_words_no_stop(document).inspect_err(|e| {
            debug!(document_id, error = %e, "document rejected");
        })?;

        self.index.insert(document_id, &words);
        self.documents.insert(document_id, DocumentData { rating: compute_average_rating(ratings), status });
        self.ids.push(document_id);
        debug!(document_id, words = words.len(), %status, "document added");
        Ok(())
    }

    /// Ranked search over documents accepted by `predicate`, best first,
    /// at most [`MAX_RESULT_DOCUMENT_COUNT`] results.
    pub fn find_top_documents_by<F>(&self, raw_query: &str, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        if query.is_stop_only() {
            return Ok(Vec::new());
        }

        let mut result = self.find_all_documents(&query, &predicate);
        let total_hits = result.len();
        result.sort_by_key(|doc| (Reverse(quantize(doc.relevance)), Reverse(doc.rating)));
        result.truncate(MAX_RESULT_DOCUMENT_COUNT);
        debug!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            stop = query.stop_words.len(),
            total_hits,
            "query executed"
        );
        Ok(result)
    }

    pub fn find_top_documents_with_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, |_, document_status, _| document_status == status)
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    /// Plus-words of `raw_query` present in the document, in lexicographic
    /// order, or nothing if any minus-word is present.
    pub fn match_document(&self, raw_query: &str, document_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let data = self
            .documents
            .get(&document_id)
            .ok_or_else(|| SearchError::bad_argument(format!("document id {document_id} does not exist")))?;

        let query = parse_query(raw_query, &self.stop_words)?;
        if query.is_stop_only() {
            return Ok((Vec::new(), DocumentStatus::Actual));
        }

        if query.minus_words.iter().any(|w| self.index.contains(w, document_id)) {
            return Ok((Vec::new(), data.status));
        }
        let matched_words = query
            .plus_words
            .into_iter()
            .filter(|w| self.index.contains(w, document_id))
            .collect();
        Ok((matched_words, data.status))
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::bad_argument(format!("invalid word {word:?} in document")));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn find_all_documents(&self, query: &Query, predicate: &dyn Fn(DocId, DocumentStatus, i32) -> bool) -> Vec<Document> {
        let total = self.document_count();
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let (Some(postings), Some(idf)) = (self.index.postings(word), self.index.inverse_document_freq(word, total)) else {
                continue;
            };
            for (&document_id, &term_freq) in postings {
                let data = &self.documents[&document_id];
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for document_id in postings.keys() {
                    document_to_relevance.remove(document_id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.documents[&id].rating))
            .collect()
    }
}

/// Relevance bucketed to multiples of [`EPSILON`], giving a total order for sorting.
fn quantize(relevance: f64) -> i64 {
    (relevance / EPSILON).round() as i64
}
