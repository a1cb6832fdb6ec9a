use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed input table: {0}")]
    Schema(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Vector count mismatch: corpus has {expected} documents, got {actual} vectors")]
    ShapeMismatch { expected: usize, actual: usize },
}
