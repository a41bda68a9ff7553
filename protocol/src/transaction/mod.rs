//! # Transaction Module
//!
//! Type-state construction of ledger transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs     Amount and its decimal-string parser
//! command.rs   One struct per command kind, and the Command sum over them
//! payload.rs   Wire representation (Payload, Transaction) and its hash
//! state.rs     Set/Unset markers, RequiredField, BuilderState
//! builder.rs   Draft and the type-state TransactionBuilder
//! unsigned.rs  UnsignedTransaction, the validated build output
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Assemble**: chain setters and command methods on a
//!    [`TransactionBuilder`]. Each call returns a new builder.
//! 2. **Build**: `.build()` exists once creator, counter, creation time and
//!    at least one command are present. It runs the builder's validator.
//! 3. **Sign**: hand the [`UnsignedTransaction`] to a signing stage.

pub mod builder;
pub mod command;
pub mod payload;
pub mod state;
pub mod types;
pub mod unsigned;

pub use builder::{BuildError, Draft, ReadyBuilder, TransactionBuilder};
pub use command::Command;
pub use payload::{Payload, Transaction};
pub use state::{BuilderState, FieldState, RequiredField, Set, Unset};
pub use types::{Amount, AmountError};
pub use unsigned::UnsignedTransaction;
