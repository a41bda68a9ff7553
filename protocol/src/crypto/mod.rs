//! # Cryptographic Primitives
//!
//! Only what the builder needs: SHA-256 hashing for transaction hashes and
//! the public key blob type carried by key-bearing commands. Signing lives
//! downstream of this crate.

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, sha256};
pub use keys::{KeyError, PublicKey};
