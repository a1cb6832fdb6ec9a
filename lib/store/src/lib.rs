//! # linkrec Store
//!
//! Persistence layer for the linkrec embedding cache: the on-disk
//! vector store blob and the cache manager that decides reuse versus
//! recomputation based on the dataset signature.

pub mod manager;
pub mod store;

pub use manager::CacheManager;
pub use store::{FileStore, MemoryStore, StoreError, StorePayload, VectorStore};
