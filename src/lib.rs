//! # linkrec
//!
//! Content-similarity link recommendations between text documents,
//! with a signature-validated embedding cache so expensive vectors are
//! reused across runs without ever serving stale results.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install linkrec
//! linkrec --input articles_metadata.csv --output internal_link_recommendations.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use linkrec::prelude::*;
//!
//! let rows = vec![
//!     RawDocument::new("https://example.com/cats", "Cats", "cats and dogs", "pets"),
//!     RawDocument::new("https://example.com/dogs", "Dogs", "dogs and cats", "pets"),
//! ];
//! let corpus = Corpus::normalize(&rows);
//!
//! let embedder = HashEmbedder::new(128);
//! let signature = corpus_signature(&corpus, embedder.model_id());
//!
//! let manager = CacheManager::new(MemoryStore::new());
//! let vectors = manager.embeddings(&corpus, &signature, &embedder).unwrap();
//!
//! let recs = recommend(&corpus, &vectors, 1).unwrap();
//! assert!(recs.iter().all(|r| r.source_url != r.target_url));
//! ```
//!
//! ## Crate Structure
//!
//! linkrec is composed of several crates:
//!
//! - [`linkrec-core`](https://docs.rs/linkrec-core) - Corpus normalization, dataset signatures, embedding capability
//! - [`linkrec-store`](https://docs.rs/linkrec-store) - Persisted embedding store and cache manager
//! - [`linkrec-similarity`](https://docs.rs/linkrec-similarity) - Cosine similarity matrix and top-k selection
//!
//! The root crate adds the CSV table boundary and the pipeline.

pub mod pipeline;
pub mod table;

// Re-export core types
pub use linkrec_core::{
    combine_text, corpus_signature, Corpus, Document, Embedder, Error, HashEmbedder, RawDocument,
    Result, COMBINED_TEXT_SEPARATOR, DEFAULT_DIM,
};

// Re-export store
pub use linkrec_store::{CacheManager, FileStore, MemoryStore, StorePayload, VectorStore};

// Re-export similarity engine
pub use linkrec_similarity::{recommend, Recommendation, SimilarityMatrix};

pub use pipeline::{run, Config};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        corpus_signature, recommend, CacheManager, Config, Corpus, Document, Embedder, Error,
        FileStore, HashEmbedder, MemoryStore, RawDocument, Recommendation, Result, StorePayload,
        VectorStore,
    };
}
