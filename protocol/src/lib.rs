// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger Protocol: Transaction Builder
//!
//! Assemble ledger transactions through a fluent chain of calls, with the
//! compiler keeping track of which mandatory fields are still missing.
//!
//! ```rust
//! use ledger_protocol::crypto::PublicKey;
//! use ledger_protocol::transaction::{Transaction, TransactionBuilder};
//! use ledger_protocol::validation::Answer;
//!
//! let unsigned = TransactionBuilder::with_validator(|_: &Transaction| Answer::new())
//!     .creator_account_id("a@domain")
//!     .tx_counter(1)
//!     .created_time(1000)
//!     .add_peer("127.0.0.1:10001", PublicKey::from_bytes([0u8; 32]))
//!     .build()?;
//!
//! assert_eq!(unsigned.creator_account_id(), "a@domain");
//! # Ok::<(), ledger_protocol::transaction::BuildError>(())
//! ```
//!
//! ## Architecture
//!
//! - **transaction**: Commands, the type-state builder, the wire
//!   representation and the validated `UnsignedTransaction` it produces.
//! - **validation**: The `Validator` capability, its `Answer`, and the
//!   stateless `DefaultValidator`.
//! - **crypto**: SHA-256 hashing and the public key blob type.
//! - **config**: Protocol constants and `ValidationConfig`.
//! - **logging**: Optional `tracing` subscriber setup.
//!
//! Signing, transport and ledger application live elsewhere.

pub mod config;
pub mod crypto;
pub mod logging;
pub mod transaction;
pub mod validation;
