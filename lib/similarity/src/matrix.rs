//! Dense cosine similarity matrix
//!
//! Transient N x N matrix recomputed every run from the embedding
//! store; row `i` holds the similarity of document `i` to all others.
//! The diagonal is masked to a sentinel strictly below any valid
//! cosine similarity so a document can never rank itself.

/// Sentinel used for masked entries; strictly below the cosine range
/// [-1, 1], including an exact -1 between genuinely opposite vectors.
pub const MASKED: f32 = f32::NEG_INFINITY;

#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    n: usize,
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Build the pairwise cosine similarity matrix with a masked
    /// diagonal.
    ///
    /// Zero-norm vectors (e.g. from an all-empty document) score 0.0
    /// against everything rather than producing NaN.
    pub fn from_embeddings(vectors: &[Vec<f32>]) -> Self {
        let n = vectors.len();
        let norms: Vec<f32> = vectors.iter().map(|v| norm(v)).collect();

        let mut rows = vec![vec![0.0f32; n]; n];
        for i in 0..n {
            rows[i][i] = MASKED;
            for j in (i + 1)..n {
                let sim = if norms[i] == 0.0 || norms[j] == 0.0 {
                    0.0
                } else {
                    dot(&vectors[i], &vectors[j]) / (norms[i] * norms[j])
                };
                rows[i][j] = sim;
                rows[j][i] = sim;
            }
        }

        Self { n, rows }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of document `i` to document `j`; [`MASKED`] on the
    /// diagonal.
    #[inline]
    pub fn sim(&self, i: usize, j: usize) -> f32 {
        self.rows[i][j]
    }

    /// Row `i`: similarity of document `i` to every document.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.rows[i]
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}
