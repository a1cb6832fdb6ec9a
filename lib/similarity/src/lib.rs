//! # linkrec Similarity
//!
//! The similarity engine for linkrec: pairwise cosine similarity over
//! the embedding store and deterministic top-k neighbor selection.
//!
//! ## Example
//!
//! ```rust
//! use linkrec_core::{Corpus, Embedder, HashEmbedder, RawDocument};
//! use linkrec_similarity::recommend;
//!
//! let rows = vec![
//!     RawDocument::new("https://example.com/cats", "Cats", "cats and dogs", ""),
//!     RawDocument::new("https://example.com/dogs", "Dogs", "dogs and cats", ""),
//! ];
//! let corpus = Corpus::normalize(&rows);
//!
//! let embedder = HashEmbedder::new(128);
//! let vectors = embedder.embed_batch(&corpus.combined_texts()).unwrap();
//!
//! let recs = recommend(&corpus, &vectors, 1).unwrap();
//! assert_eq!(recs.len(), 2);
//! assert!(recs.iter().all(|r| r.source_url != r.target_url));
//! ```

pub mod matrix;
pub mod recommend;

pub use matrix::{SimilarityMatrix, MASKED};
pub use recommend::{recommend, Recommendation};
