//! Embedding cache manager
//!
//! Owns the persisted embedding store and decides reuse versus
//! recomputation. State machine over the store:
//!
//! 1. Absent: compute fresh, persist, return.
//! 2. Present with matching signature, model id, and row count: return
//!    the stored vectors unchanged, without invoking the model.
//! 3. Any mismatch, or an unreadable/corrupt store: treat as absent
//!    and overwrite.
//!
//! Corruption is recovered here and logged, never surfaced. A failed
//! persist after a successful recompute is also only logged: the run
//! can still produce recommendations from the in-memory vectors, and
//! the previous on-disk blob is untouched.

use crate::store::{StorePayload, VectorStore};
use linkrec_core::{Corpus, Embedder, Result};
use tracing::{debug, info, warn};

pub struct CacheManager<S: VectorStore> {
    store: S,
}

impl<S: VectorStore> CacheManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return one vector per corpus document, reusing the persisted
    /// store when it is still valid for `(corpus, signature, model)`.
    ///
    /// # Errors
    ///
    /// Only [`linkrec_core::Error::ModelUnavailable`] escapes; every
    /// store-level failure is recovered by recomputation.
    pub fn embeddings(
        &self,
        corpus: &Corpus,
        signature: &str,
        embedder: &dyn Embedder,
    ) -> Result<Vec<Vec<f32>>> {
        match self.store.load() {
            Ok(Some(payload)) => {
                if payload.signature == signature
                    && payload.model_id == embedder.model_id()
                    && payload.vectors.len() == corpus.len()
                {
                    debug!(rows = corpus.len(), "embedding store valid, reusing vectors");
                    return Ok(payload.vectors);
                }
                info!(
                    stored_model = %payload.model_id,
                    stored_rows = payload.vectors.len(),
                    rows = corpus.len(),
                    "embedding store stale, recomputing"
                );
            }
            Ok(None) => {
                info!("no embedding store found, computing fresh");
            }
            Err(e) => {
                warn!("embedding store unreadable ({e}), recomputing");
            }
        }

        self.rebuild(corpus, signature, embedder)
    }

    /// Compute embeddings fresh and overwrite the persisted store,
    /// ignoring any cached state. Also the recovery path for a
    /// downstream shape mismatch (stale handle passed by a caller).
    pub fn rebuild(
        &self,
        corpus: &Corpus,
        signature: &str,
        embedder: &dyn Embedder,
    ) -> Result<Vec<Vec<f32>>> {
        let texts = corpus.combined_texts();
        let vectors = embedder.embed_batch(&texts)?;

        let payload = StorePayload::new(
            embedder.model_id().to_string(),
            signature.to_string(),
            vectors.clone(),
        );
        if let Err(e) = self.store.save(&payload) {
            // Not fatal: the run proceeds on in-memory vectors and the
            // next run recomputes from scratch
            warn!("failed to persist embedding store: {e}");
        } else {
            debug!(rows = vectors.len(), "embedding store persisted");
        }

        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, MemoryStore};
    use linkrec_core::{corpus_signature, Error, HashEmbedder, RawDocument};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Wraps the hash embedder and counts model invocations, so tests
    /// can observe cache hits versus recomputation.
    struct CountingEmbedder {
        inner: HashEmbedder,
        calls: AtomicUsize,
    }

    impl CountingEmbedder {
        fn new(dim: usize) -> Self {
            Self {
                inner: HashEmbedder::new(dim),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Embedder for CountingEmbedder {
        fn model_id(&self) -> &str {
            self.inner.model_id()
        }

        fn dim(&self) -> usize {
            self.inner.dim()
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.embed_batch(texts)
        }
    }

    struct UnavailableEmbedder;

    impl Embedder for UnavailableEmbedder {
        fn model_id(&self) -> &str {
            "unavailable-v0"
        }

        fn dim(&self) -> usize {
            0
        }

        fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Err(Error::ModelUnavailable("model is offline".to_string()))
        }
    }

    fn corpus_of(rows: &[(&str, &str)]) -> Corpus {
        let raws: Vec<RawDocument> = rows
            .iter()
            .map(|(url, title)| RawDocument::new(*url, *title, "", ""))
            .collect();
        Corpus::normalize(&raws)
    }

    #[test]
    fn test_first_run_computes_and_persists() {
        let corpus = corpus_of(&[("https://a", "cats"), ("https://b", "dogs")]);
        let embedder = CountingEmbedder::new(32);
        let sig = corpus_signature(&corpus, embedder.model_id());

        let manager = CacheManager::new(MemoryStore::new());
        let vectors = manager.embeddings(&corpus, &sig, &embedder).unwrap();

        assert_eq!(vectors.len(), 2);
        assert_eq!(embedder.calls(), 1);
    }

    #[test]
    fn test_unchanged_corpus_reuses_without_model_invocation() {
        let corpus = corpus_of(&[("https://a", "cats"), ("https://b", "dogs")]);
        let embedder = CountingEmbedder::new(32);
        let sig = corpus_signature(&corpus, embedder.model_id());

        let manager = CacheManager::new(MemoryStore::new());
        let first = manager.embeddings(&corpus, &sig, &embedder).unwrap();
        let second = manager.embeddings(&corpus, &sig, &embedder).unwrap();

        assert_eq!(first, second);
        assert_eq!(embedder.calls(), 1);
    }

    #[test]
    fn test_changed_text_triggers_recompute() {
        let embedder = CountingEmbedder::new(32);
        let manager = CacheManager::new(MemoryStore::new());

        let before = corpus_of(&[("https://a", "cats"), ("https://b", "dogs")]);
        let sig_before = corpus_signature(&before, embedder.model_id());
        manager.embeddings(&before, &sig_before, &embedder).unwrap();

        let after = corpus_of(&[("https://a", "cats are great"), ("https://b", "dogs")]);
        let sig_after = corpus_signature(&after, embedder.model_id());
        assert_ne!(sig_before, sig_after);

        manager.embeddings(&after, &sig_after, &embedder).unwrap();
        assert_eq!(embedder.calls(), 2);
    }

    #[test]
    fn test_model_change_triggers_recompute() {
        let corpus = corpus_of(&[("https://a", "cats"), ("https://b", "dogs")]);
        let manager = CacheManager::new(MemoryStore::new());

        let small = CountingEmbedder::new(32);
        let sig_small = corpus_signature(&corpus, small.model_id());
        manager.embeddings(&corpus, &sig_small, &small).unwrap();

        let large = CountingEmbedder::new(64);
        let sig_large = corpus_signature(&corpus, large.model_id());
        let vectors = manager.embeddings(&corpus, &sig_large, &large).unwrap();

        assert_eq!(large.calls(), 1);
        assert_eq!(vectors[0].len(), 64);
    }

    #[test]
    fn test_corrupt_store_recovers_silently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.bin");

        let corpus = corpus_of(&[("https://a", "cats"), ("https://b", "dogs")]);
        let embedder = CountingEmbedder::new(32);
        let sig = corpus_signature(&corpus, embedder.model_id());

        let manager = CacheManager::new(FileStore::new(&path));
        manager.embeddings(&corpus, &sig, &embedder).unwrap();

        // Truncate the blob to simulate a torn write
        let data = std::fs::read(&path).unwrap();
        std::fs::write(&path, &data[..data.len() / 2]).unwrap();

        let vectors = manager.embeddings(&corpus, &sig, &embedder).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(embedder.calls(), 2);

        // The rebuilt store is valid again
        manager.embeddings(&corpus, &sig, &embedder).unwrap();
        assert_eq!(embedder.calls(), 2);
    }

    #[test]
    fn test_rebuild_bypasses_valid_cache() {
        let corpus = corpus_of(&[("https://a", "cats")]);
        let embedder = CountingEmbedder::new(32);
        let sig = corpus_signature(&corpus, embedder.model_id());

        let manager = CacheManager::new(MemoryStore::new());
        manager.embeddings(&corpus, &sig, &embedder).unwrap();
        manager.rebuild(&corpus, &sig, &embedder).unwrap();

        assert_eq!(embedder.calls(), 2);
    }

    #[test]
    fn test_model_unavailable_is_surfaced() {
        let corpus = corpus_of(&[("https://a", "cats")]);
        let manager = CacheManager::new(MemoryStore::new());

        let result = manager.embeddings(&corpus, "sig", &UnavailableEmbedder);
        assert!(matches!(result, Err(Error::ModelUnavailable(_))));
    }
}
