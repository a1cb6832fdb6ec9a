//! Top-k neighbor selection
//!
//! Turns the similarity matrix into per-document recommendation rows
//! with a fully deterministic ranking: score descending, exact ties
//! broken by ascending target URL, never by incidental array order.

use crate::matrix::SimilarityMatrix;
use linkrec_core::{Corpus, Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One recommended link: a source document pointing at one of its
/// top-k neighbors. The anchor text is the target's title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub source_url: String,
    pub target_url: String,
    pub similarity_score: f32,
    pub anchor_text: String,
}

/// Compute per-document top-k recommendations.
///
/// Effective k is `max(1, min(k, N-1))`, so every document gets at
/// least one neighbor whenever N >= 2 and never more than exist. With
/// fewer than two documents the result is empty, which is a valid
/// "no recommendations possible" outcome, not an error.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] when the vector count differs from the
/// corpus length (stale handle passed by the caller); the caller is
/// expected to force a cache rebuild and retry.
pub fn recommend(corpus: &Corpus, vectors: &[Vec<f32>], k: usize) -> Result<Vec<Recommendation>> {
    if vectors.len() != corpus.len() {
        return Err(Error::ShapeMismatch {
            expected: corpus.len(),
            actual: vectors.len(),
        });
    }

    let n = corpus.len();
    if n < 2 {
        return Ok(Vec::new());
    }

    let matrix = SimilarityMatrix::from_embeddings(vectors);
    let top_k = k.clamp(1, n - 1);

    let mut recommendations = Vec::with_capacity(n * top_k);
    for (i, source) in corpus.iter().enumerate() {
        let row = matrix.row(i);
        let mut candidates: Vec<usize> = (0..n).filter(|&j| j != i).collect();

        // Score descending, ties by ascending target URL. The masked
        // diagonal is already excluded, so no NaN or -inf reaches the
        // comparator.
        candidates.sort_by(|&a, &b| {
            row[b]
                .partial_cmp(&row[a])
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    let url_a = corpus.get(a).map(|d| d.url.as_str()).unwrap_or_default();
                    let url_b = corpus.get(b).map(|d| d.url.as_str()).unwrap_or_default();
                    url_a.cmp(url_b)
                })
        });

        for &target_idx in candidates.iter().take(top_k) {
            if let Some(target) = corpus.get(target_idx) {
                recommendations.push(Recommendation {
                    source_url: source.url.clone(),
                    target_url: target.url.clone(),
                    similarity_score: row[target_idx],
                    anchor_text: target.title.clone(),
                });
            }
        }
    }

    Ok(recommendations)
}
