//! # Validation
//!
//! The builder's finalize step is generic over a [`Validator`]: anything that
//! can look at a candidate [`Transaction`] and return an [`Answer`]. The
//! crate ships [`DefaultValidator`], a stateless field validator; tests and
//! callers with their own policy can plug in anything else, including a
//! plain closure.
//!
//! Validators must be stateless from the builder's point of view: `validate`
//! takes `&self`, may run concurrently on independent transactions, and
//! must not have observable side effects.

pub mod answer;
pub mod stateless;

pub use answer::{Answer, ReasonsGroup};
pub use stateless::DefaultValidator;

use crate::transaction::payload::Transaction;

/// Judges a structurally complete candidate transaction.
pub trait Validator {
    /// Returns an [`Answer`]; the transaction is accepted iff
    /// `!answer.has_errors()`.
    fn validate(&self, tx: &Transaction) -> Answer;
}

impl<F> Validator for F
where
    F: Fn(&Transaction) -> Answer,
{
    fn validate(&self, tx: &Transaction) -> Answer {
        self(tx)
    }
}
