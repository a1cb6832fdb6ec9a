//! End-to-end recommendation pipeline
//!
//! raw table -> normalizer -> signature -> cache manager -> similarity
//! engine -> recommendation table. Single-threaded and synchronous;
//! the only internally parallel step is batch embedding inside the
//! embedder.

use crate::table;
use anyhow::Result;
use linkrec_core::{corpus_signature, Corpus, Embedder, Error, HashEmbedder, DEFAULT_DIM};
use linkrec_similarity::recommend;
use linkrec_store::{CacheManager, FileStore};
use std::path::PathBuf;
use tracing::{info, warn};

/// Static process-level configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Crawler metadata table (CSV, keyed by `url`)
    pub input: PathBuf,
    /// Recommendation table consumed by the visualizer
    pub output: PathBuf,
    /// Persisted embedding store blob
    pub cache: PathBuf,
    /// Embedding dimension of the built-in hash embedder
    pub dim: usize,
    /// Neighbors requested per document
    pub top_k: usize,
    /// Optional row cap for testing, applied after normalization
    pub max_rows: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("articles_metadata.csv"),
            output: PathBuf::from("internal_link_recommendations.csv"),
            cache: PathBuf::from("embeddings.bin"),
            dim: DEFAULT_DIM,
            top_k: 8,
            max_rows: None,
        }
    }
}

/// Run the pipeline once.
///
/// Schema and model failures abort cleanly before any output is
/// written; cache corruption and shape mismatches are recovered by
/// rebuilding and never surface.
pub fn run(config: &Config) -> Result<()> {
    let rows = table::read_documents(&config.input)?;
    let mut corpus = Corpus::normalize(&rows);
    if let Some(max) = config.max_rows {
        corpus.truncate(max);
        info!(max, "row cap applied");
    }
    info!(raw_rows = rows.len(), documents = corpus.len(), "corpus normalized");

    if corpus.len() < 2 {
        info!("fewer than two documents, no recommendations possible");
        table::write_recommendations(&config.output, &[])?;
        return Ok(());
    }

    let embedder = HashEmbedder::new(config.dim);
    let signature = corpus_signature(&corpus, embedder.model_id());
    let manager = CacheManager::new(FileStore::new(&config.cache));

    let vectors = manager.embeddings(&corpus, &signature, &embedder)?;

    let recommendations = match recommend(&corpus, &vectors, config.top_k) {
        Ok(recs) => recs,
        Err(e @ Error::ShapeMismatch { .. }) => {
            // Stale vectors slipped past validation; rebuild once
            warn!("{e}, forcing embedding rebuild");
            let vectors = manager.rebuild(&corpus, &signature, &embedder)?;
            recommend(&corpus, &vectors, config.top_k)?
        }
        Err(e) => return Err(e.into()),
    };

    info!(rows = recommendations.len(), output = %config.output.display(), "writing recommendations");
    table::write_recommendations(&config.output, &recommendations)?;
    Ok(())
}
