//! Dataset signatures
//!
//! A signature fingerprints the exact ordered sequence of (URL,
//! combined_text) pairs together with the model identifier. The cache
//! manager compares it against the persisted store to decide whether
//! stored embeddings are still valid. Any change to document set, text,
//! order, or model changes the digest.

use crate::corpus::Corpus;
use sha2::{Digest, Sha256};

/// Field/record separator fed into the hash between every component.
///
/// NUL never occurs inside URLs or combined text coming out of the
/// normalizer, so "ab" + "c" and "a" + "bc" hash differently.
const SEP: &[u8] = b"\x00";

/// Compute the signature for a corpus under a given model identifier.
///
/// Pure function over an explicitly ordered, explicitly delimited byte
/// stream: the model id seeds the hash, then each document contributes
/// `SEP || url || SEP || combined_text`. Output is a lowercase hex
/// string (256 bits).
pub fn corpus_signature(corpus: &Corpus, model_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model_id.as_bytes());
    for doc in corpus.iter() {
        hasher.update(SEP);
        hasher.update(doc.url.as_bytes());
        hasher.update(SEP);
        hasher.update(doc.combined_text.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}
