//! Embedding capability
//!
//! The embedding model is abstracted as a single capability: map an
//! ordered sequence of texts to fixed-width vectors, deterministically
//! per model identifier. Cache and similarity logic only ever see this
//! trait, so alternate backends are swappable without touching them.

use crate::error::{Error, Result};
use rayon::prelude::*;

/// Default embedding dimension
pub const DEFAULT_DIM: usize = 256;

/// Maps ordered texts to fixed-width vectors, deterministically per
/// model identifier.
///
/// Batch embedding is the only operation in the pipeline allowed to be
/// slow, and the only one that may parallelize internally. The caller
/// sees one blocking call.
pub trait Embedder: Send + Sync {
    /// Identifier that changes whenever the produced vectors would
    /// change (algorithm version, dimension, upstream model name).
    fn model_id(&self) -> &str;

    /// Width of every produced vector
    fn dim(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// # Errors
    ///
    /// [`Error::ModelUnavailable`] when the backing model cannot be
    /// invoked. There is no partial output.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}

/// Built-in deterministic hash embedder.
///
/// Hashes character trigrams and whole words into a fixed-width vector
/// and normalizes it to unit length. No external model, fully
/// deterministic and cheap; suitable as the default backend and for
/// tests. Words contribute with double weight so that shared
/// vocabulary dominates shared character fragments.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
    model_id: String,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIM)
    }
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            model_id: format!("hash-trigram-v1-{dim}d"),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        // Whitespace-only text has no words and would otherwise pick up
        // padding-only trigrams; it must stay a zero vector
        if normalized.trim().is_empty() {
            return vector;
        }

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 1.0;
        }

        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 2.0;
        }

        // Normalize to unit length; the all-empty text stays a zero
        // vector, which cosine similarity scores 0.0 against everything
        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }

        vector
    }
}

impl Embedder for HashEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if self.dim == 0 {
            return Err(Error::ModelUnavailable(
                "embedding dimension must be non-zero".to_string(),
            ));
        }
        Ok(texts.par_iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Generate character trigrams from a string, with boundary padding
fn generate_trigrams(s: &str) -> Vec<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return Vec::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
