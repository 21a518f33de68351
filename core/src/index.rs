use crate::DocId;
use std::collections::{BTreeMap, HashMap};

/// Term frequencies of one word, keyed by document id.
pub type Postings = BTreeMap<DocId, f64>;

/// Word -> document -> term frequency. Term frequency is normalised by the
/// document's word count after stop-word removal.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index the already filtered words of a document. A document with no
    /// words leaves the index untouched.
    pub fn insert<S: AsRef<str>>(&mut self, doc_id: DocId, words: &[S]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self
                .word_to_document_freqs
                .entry(word.as_ref().to_string())
                .or_default()
                .entry(doc_id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_document_freqs.get(word)
    }

    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.postings(word).is_some_and(|p| p.contains_key(&doc_id))
    }

    /// `ln(total / df)` for a word present in the index.
    pub fn inverse_document_freq(&self, word: &str, total_documents: usize) -> Option<f64> {
        self.postings(word)
            .map(|p| (total_documents as f64 / p.len() as f64).ln())
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &Postings)> + '_ {
        self.word_to_document_freqs.iter().map(|(w, p)| (w.as_str(), p))
    }

    pub fn len(&self) -> usize { self.word_to_document_freqs.len() }

    pub fn is_empty(&self) -> bool { self.word_to_document_freqs.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_frequency_accumulates() {
        let mut idx = InvertedIndex::new();
        idx.insert(4, &["пушистый", "кот", "пушистый", "хвост"]);
        assert_eq!(idx.len(), 3);
        let tf = idx.postings("пушистый").unwrap()[&4];
        assert!((tf - 0.5).abs() < 1e-12);
        let tf = idx.postings("кот").unwrap()[&4];
        assert!((tf - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_document_is_skipped() {
        let mut idx = InvertedIndex::new();
        idx.insert::<&str>(1, &[]);
        assert!(idx.is_empty());
    }

    #[test]
    fn idf_uses_document_frequency() {
        let mut idx = InvertedIndex::new();
        idx.insert(1, &["cat"]);
        idx.insert(2, &["cat", "dog"]);
        let idf = idx.inverse_document_freq("dog", 2).unwrap();
        assert!((idf - 2f64.ln()).abs() < 1e-12);
        assert_eq!(idx.inverse_document_freq("cat", 2), Some(0.0));
        assert_eq!(idx.inverse_document_freq("bird", 2), None);
        assert!(idx.contains("dog", 2));
        assert!(!idx.contains("dog", 1));
    }
}
