//! Corpus normalization
//!
//! Canonicalizes the raw document table into a deterministic,
//! deduplicated, URL-sorted sequence. The resulting order is the sole
//! index used to align embeddings to documents: position `i` in the
//! corpus always corresponds to row `i` of the embedding store, so any
//! reordering, insertion or deletion invalidates stored embeddings
//! (which the dataset signature detects).

use crate::document::{Document, RawDocument};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The deduplicated, URL-sorted sequence of documents being compared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Normalize raw crawler records into a corpus.
    ///
    /// - Rows without a usable URL are dropped.
    /// - Duplicate URLs keep the first occurrence in input order,
    ///   applied before sorting (pandas `drop_duplicates` policy).
    /// - Documents are sorted ascending by URL so that the corpus is
    ///   independent of upstream discovery order.
    pub fn normalize(rows: &[RawDocument]) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
        let mut documents: Vec<Document> = Vec::with_capacity(rows.len());

        for raw in rows {
            if let Some(doc) = Document::from_raw(raw) {
                // First-seen wins; later rows with the same URL are dropped
                if seen.insert(doc.url.clone()) {
                    documents.push(doc);
                }
            }
        }

        documents.sort_by(|a, b| a.url.cmp(&b.url));
        Self { documents }
    }

    /// Truncate to at most `max` documents (testing row cap).
    ///
    /// Applied after normalization, so the kept prefix is stable for a
    /// given document set.
    pub fn truncate(&mut self, max: usize) {
        self.documents.truncate(max);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// The ordered combined texts, aligned with corpus positions.
    pub fn combined_texts(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|d| d.combined_text.as_str())
            .collect()
    }
}
