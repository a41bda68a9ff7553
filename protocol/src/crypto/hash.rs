//! # Hashing Utilities
//!
//! SHA-256 and its doubled form. Transaction hashes handed to the signing
//! stage are `double_sha256` of the canonical payload bytes.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use ledger_protocol::crypto::sha256;
///
/// let hash = sha256(b"ledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Compute the double-SHA-256 hash: `SHA-256(SHA-256(data))`.
///
/// # Example
///
/// ```
/// use ledger_protocol::crypto::double_sha256;
///
/// let tx_hash = double_sha256(b"raw transaction bytes");
/// assert_eq!(tx_hash.len(), 32);
/// ```
pub fn double_sha256(data: &[u8]) -> Vec<u8> {
    sha256(&sha256(data))
}
