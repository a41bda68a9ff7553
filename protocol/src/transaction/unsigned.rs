//! The output of a successful build.
//!
//! An [`UnsignedTransaction`] can only be produced by the builder's finalize
//! step, so holding one means the validator has approved its contents. It
//! has no mutators and no signatures; the signing stage takes it from here.

use serde::Serialize;

use super::command::Command;
use super::payload::{Payload, Transaction};

/// A validated, immutable, not-yet-signed transaction.
///
/// Serializable (for handing to a remote signer) but deliberately not
/// deserializable: the only way in is through validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnsignedTransaction {
    transaction: Transaction,
}

impl UnsignedTransaction {
    pub(crate) fn new(transaction: Transaction) -> Self {
        Self { transaction }
    }

    /// The validated wire transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn payload(&self) -> &Payload {
        &self.transaction.payload
    }

    pub fn creator_account_id(&self) -> &str {
        &self.transaction.payload.creator_account_id
    }

    pub fn tx_counter(&self) -> u64 {
        self.transaction.payload.tx_counter
    }

    pub fn created_time(&self) -> u64 {
        self.transaction.payload.created_time
    }

    /// Commands in execution order.
    pub fn commands(&self) -> &[Command] {
        &self.transaction.payload.commands
    }

    /// Bytes the signing stage signs over.
    pub fn signable_bytes(&self) -> Vec<u8> {
        self.transaction.signable_bytes()
    }

    /// `double_sha256` of [`signable_bytes`](Self::signable_bytes).
    pub fn hash(&self) -> Vec<u8> {
        self.transaction.hash()
    }

    pub fn hash_hex(&self) -> String {
        self.transaction.hash_hex()
    }

    /// Unwraps the transaction for the signing stage.
    pub fn into_inner(self) -> Transaction {
        self.transaction
    }
}

impl From<UnsignedTransaction> for Transaction {
    fn from(unsigned: UnsignedTransaction) -> Self {
        unsigned.into_inner()
    }
}

impl AsRef<Transaction> for UnsignedTransaction {
    fn as_ref(&self) -> &Transaction {
        &self.transaction
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
