//! # linkrec Core
//!
//! Core library for the linkrec recommendation engine.
//!
//! This crate provides the fundamental data structures and algorithms:
//!
//! - [`Document`] / [`Corpus`] - normalized, URL-sorted document sequence
//! - [`corpus_signature`] - content+order+model fingerprint for cache validation
//! - [`Embedder`] - the embedding-model capability, with the built-in
//!   deterministic [`HashEmbedder`]
//!
//! ## Example
//!
//! ```rust
//! use linkrec_core::{Corpus, RawDocument, Embedder, HashEmbedder, corpus_signature};
//!
//! let rows = vec![
//!     RawDocument::new("https://example.com/cats", "Cats", "All about cats", "cats, pets"),
//!     RawDocument::new("https://example.com/dogs", "Dogs", "All about dogs", "dogs, pets"),
//! ];
//! let corpus = Corpus::normalize(&rows);
//!
//! let embedder = HashEmbedder::new(128);
//! let signature = corpus_signature(&corpus, embedder.model_id());
//! let vectors = embedder.embed_batch(&corpus.combined_texts()).unwrap();
//! assert_eq!(vectors.len(), corpus.len());
//! ```

pub mod corpus;
pub mod document;
pub mod embedder;
pub mod error;
pub mod signature;

pub use corpus::Corpus;
pub use document::{combine_text, Document, RawDocument, COMBINED_TEXT_SEPARATOR};
pub use embedder::{Embedder, HashEmbedder, DEFAULT_DIM};
pub use error::{Error, Result};
pub use signature::corpus_signature;
