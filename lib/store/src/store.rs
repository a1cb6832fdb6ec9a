//! Persisted embedding store
//!
//! The store is an explicit resource handle passed into the cache
//! manager, not implicit global file state. The on-disk format is a
//! private bincode blob holding the vectors together with the dataset
//! signature, the model identifier, and an integrity checksum. Only
//! this crate reads or writes it.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Unreadable, undecodable, or checksum-mismatched store contents.
    /// Always recovered by a rebuild, never surfaced to the caller.
    #[error("Embedding store corrupt: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything persisted between runs: one vector per corpus document in
/// corpus order, plus the metadata that validates reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub model_id: String,
    pub signature: String,
    checksum: String,
    pub vectors: Vec<Vec<f32>>,
}

impl StorePayload {
    pub fn new(model_id: String, signature: String, vectors: Vec<Vec<f32>>) -> Self {
        let checksum = Self::compute_checksum(&model_id, &signature, &vectors);
        Self {
            model_id,
            signature,
            checksum,
            vectors,
        }
    }

    /// Verify the integrity checksum recorded at save time.
    pub fn verify(&self) -> Result<()> {
        let expected = Self::compute_checksum(&self.model_id, &self.signature, &self.vectors);
        if self.checksum == expected {
            Ok(())
        } else {
            Err(StoreError::Corrupt(format!(
                "checksum mismatch: expected {expected}, got {}",
                self.checksum
            )))
        }
    }

    fn compute_checksum(model_id: &str, signature: &str, vectors: &[Vec<f32>]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(model_id.as_bytes());
        hasher.update(b"\x00");
        hasher.update(signature.as_bytes());
        for vector in vectors {
            // Length-prefixed: zero-valued floats serialize as zero
            // bytes, so a bare separator would not frame unambiguously
            hasher.update(b"\x00");
            hasher.update((vector.len() as u64).to_le_bytes());
            for value in vector {
                hasher.update(value.to_le_bytes());
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Load/save operations over the persisted embedding store.
///
/// Implemented by [`FileStore`] for real runs and [`MemoryStore`] for
/// isolated tests.
pub trait VectorStore: Send + Sync {
    /// Load the persisted payload, `None` when no store exists yet.
    fn load(&self) -> Result<Option<StorePayload>>;

    /// Persist a payload, replacing any previous one atomically.
    fn save(&self, payload: &StorePayload) -> Result<()>;
}

/// File-backed store: a single bincode blob written atomically.
///
/// A crash mid-write leaves either the previous blob or a temp file
/// that never becomes visible, and truncated or hand-edited blobs fail
/// decoding or the checksum, so a torn write is always detected as
/// [`StoreError::Corrupt`] on the next read.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VectorStore for FileStore {
    fn load(&self) -> Result<Option<StorePayload>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Corrupt(format!("unreadable store file: {e}"))),
        };

        let payload: StorePayload = bincode::deserialize(&data)
            .map_err(|e| StoreError::Corrupt(format!("undecodable store file: {e}")))?;
        payload.verify()?;
        Ok(Some(payload))
    }

    fn save(&self, payload: &StorePayload) -> Result<()> {
        let data = bincode::serialize(payload)
            .map_err(|e| StoreError::Corrupt(format!("serialization error: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite);
        file.write(|f| f.write_all(&data)).map_err(|e| match e {
            atomicwrites::Error::Internal(io) => StoreError::Io(io),
            atomicwrites::Error::User(io) => StoreError::Io(io),
        })?;
        Ok(())
    }
}

/// In-memory store used for isolated testing of cache behavior.
#[derive(Default)]
pub struct MemoryStore {
    payload: Mutex<Option<StorePayload>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorStore for MemoryStore {
    fn load(&self) -> Result<Option<StorePayload>> {
        let payload = self.payload.lock().clone();
        if let Some(ref p) = payload {
            p.verify()?;
        }
        Ok(payload)
    }

    fn save(&self, payload: &StorePayload) -> Result<()> {
        *self.payload.lock() = Some(payload.clone());
        Ok(())
    }
}
