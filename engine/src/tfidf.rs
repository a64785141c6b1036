//! Term-frequency / inverse-document-frequency vectorizer.
//!
//! Raw term counts weighted by a smoothed idf, `ln((1 + n) / (1 + df)) + 1`,
//! then scaled to unit length so that a plain dot product between two
//! vectors is their cosine similarity.

use crate::tokenize::tokenize;
use crate::utils::{normalize, SparseVector};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Default::default()
    }

    /// Learn the vocabulary (alphabetical order) and idf weights
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> &mut Self {
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        self.vocabulary = HashMap::with_capacity(doc_freq.len());
        self.idf = Vec::with_capacity(doc_freq.len());

        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            self.idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            self.vocabulary.insert(term, index);
        }

        log::debug!(
            "Fitted tf-idf over {} documents, {} terms",
            documents.len(),
            self.idf.len()
        );

        self
    }

    /// Weighted, unit length vector; unknown terms are dropped
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();

        for term in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.idf[index]))
            .collect();

        normalize(&mut vector);
        vector
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        self.fit(documents);
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|index| self.idf[index])
    }
}
