//! The wire representation of a transaction.
//!
//! A finished [`super::builder::Draft`] is snapshotted into a [`Transaction`],
//! which is what validators inspect and what the signing stage eventually
//! receives (wrapped in [`super::unsigned::UnsignedTransaction`]).

use serde::{Deserialize, Serialize};

use super::command::{put_str, Command};
use crate::crypto::hash::double_sha256;

/// The signed-over part of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// Account that created the transaction (`name@domain`).
    pub creator_account_id: String,

    /// Per-creator sequence number.
    pub tx_counter: u64,

    /// Unix timestamp in milliseconds.
    pub created_time: u64,

    /// Commands in execution order.
    pub commands: Vec<Command>,
}

/// A transaction as it travels between the builder, validators and the
/// signing stage. Carries no signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub payload: Payload,
}

impl Transaction {
    /// Returns the canonical byte representation the transaction hash (and,
    /// downstream, the signature) is computed over.
    ///
    /// Fixed-width little-endian integers; strings and keys carry a `u32`
    /// length prefix. Each command is its tag byte followed by its fields;
    /// the command list is prefixed by its length.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let payload = &self.payload;
        let mut buf = Vec::with_capacity(64 + payload.commands.len() * 96);

        put_str(&mut buf, &payload.creator_account_id);
        buf.extend_from_slice(&payload.tx_counter.to_le_bytes());
        buf.extend_from_slice(&payload.created_time.to_le_bytes());

        buf.extend_from_slice(&(payload.commands.len() as u32).to_le_bytes());
        for command in &payload.commands {
            command.write_signable(&mut buf);
        }

        buf
    }

    /// `double_sha256(signable_bytes)`.
    pub fn hash(&self) -> Vec<u8> {
        double_sha256(&self.signable_bytes())
    }

    /// Hex-encoded [`Transaction::hash`]. 64 characters.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
