//! Transaction construction via the type-state builder pattern.
//!
//! [`TransactionBuilder`] carries one phantom type parameter per mandatory
//! field (see [`super::state`]). Every setter consumes the builder and hands
//! back a new one with its parameter flipped to [`Set`], so by the time you
//! reach `.build()` the compiler has already checked that the creator,
//! counter, creation time and at least one command are present.
//!
//! `.build()` then snapshots the [`Draft`], runs the builder's [`Validator`]
//! over it and returns an [`UnsignedTransaction`], or the validator's reason.
//! The builder does not sign; that happens downstream.

use std::marker::PhantomData;

use thiserror::Error;
use tracing::{debug, trace, warn};

use super::command::{
    AddAssetQuantity, AddPeer, AddSignatory, Command, CreateAccount, CreateAsset, CreateDomain,
    RemoveSignatory, SetAccountDetail, SetAccountQuorum, TransferAsset,
};
use super::payload::{Payload, Transaction};
use super::state::{BuilderState, FieldState, RequiredField, Set, Unset};
use super::types::{Amount, AmountError};
use super::unsigned::UnsignedTransaction;
use crate::crypto::keys::PublicKey;
use crate::validation::{DefaultValidator, Validator};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while building a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `try_build()` was called before every required field was supplied.
    /// Unreachable through `build()`, which doesn't compile in that case.
    #[error("required fields are not set: {}", join_fields(.missing))]
    Incomplete { missing: Vec<RequiredField> },

    /// The validator rejected the assembled transaction. Carries the
    /// validator's reason verbatim.
    #[error("transaction failed validation: {0}")]
    Validation(String),

    /// An amount-bearing command was given a malformed amount string.
    #[error("invalid amount: {0}")]
    Amount(#[from] AmountError),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The in-progress transaction payload.
///
/// Unset scalars hold their zero value; the builder's type parameters, not
/// the draft, record whether they have been supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    creator_account_id: String,
    tx_counter: u64,
    created_time: u64,
    commands: Vec<Command>,
}

impl Draft {
    pub fn creator_account_id(&self) -> &str {
        &self.creator_account_id
    }

    pub fn tx_counter(&self) -> u64 {
        self.tx_counter
    }

    pub fn created_time(&self) -> u64 {
        self.created_time
    }

    /// Commands in the order they were added.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Copies the draft into the wire representation.
    pub fn snapshot(&self) -> Transaction {
        Transaction {
            payload: Payload {
                creator_account_id: self.creator_account_id.clone(),
                tx_counter: self.tx_counter,
                created_time: self.created_time,
                commands: self.commands.clone(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent, type-checked builder for [`UnsignedTransaction`]s.
///
/// Type parameters, in order: has-command, has-creator, has-counter,
/// has-created-time (each [`Set`] or [`Unset`]), then the validator `V`.
///
/// # Usage
///
/// ```rust
/// use ledger_protocol::crypto::PublicKey;
/// use ledger_protocol::transaction::{Transaction, TransactionBuilder};
/// use ledger_protocol::validation::Answer;
///
/// let unsigned = TransactionBuilder::with_validator(|_: &Transaction| Answer::new())
///     .creator_account_id("admin@test")
///     .tx_counter(1)
///     .created_time(1_700_000_000_000)
///     .add_peer("127.0.0.1:10001", PublicKey::from_bytes([1u8; 32]))
///     .build()
///     .unwrap();
///
/// assert_eq!(unsigned.commands().len(), 1);
/// ```
///
/// Leaving out a required field means there is no `build()` to call:
///
/// ```rust,compile_fail
/// use ledger_protocol::transaction::TransactionBuilder;
///
/// let unsigned = TransactionBuilder::new()
///     .creator_account_id("admin@test")
///     .created_time(1_700_000_000_000)
///     .create_domain("test", "user")
///     .build(); // no tx_counter
/// ```
///
/// The same holds for each of the other three:
///
/// ```rust,compile_fail
/// use ledger_protocol::transaction::TransactionBuilder;
///
/// let unsigned = TransactionBuilder::new()
///     .tx_counter(1)
///     .created_time(1_700_000_000_000)
///     .create_domain("test", "user")
///     .build(); // no creator_account_id
/// ```
///
/// ```rust,compile_fail
/// use ledger_protocol::transaction::TransactionBuilder;
///
/// let unsigned = TransactionBuilder::new()
///     .creator_account_id("admin@test")
///     .tx_counter(1)
///     .create_domain("test", "user")
///     .build(); // no created_time
/// ```
///
/// ```rust,compile_fail
/// use ledger_protocol::transaction::TransactionBuilder;
///
/// let unsigned = TransactionBuilder::new()
///     .creator_account_id("admin@test")
///     .tx_counter(1)
///     .created_time(1_700_000_000_000)
///     .build(); // no command
/// ```
///
/// Builders are plain values: clone one to fork a chain, and the two halves
/// evolve independently.
#[derive(Debug, Clone)]
pub struct TransactionBuilder<
    C = Unset,
    A = Unset,
    N = Unset,
    T = Unset,
    V = DefaultValidator,
> {
    draft: Draft,
    validator: V,
    _state: PhantomData<(C, A, N, T)>,
}

/// A builder with every required field supplied.
pub type ReadyBuilder<V = DefaultValidator> = TransactionBuilder<Set, Set, Set, Set, V>;

impl TransactionBuilder {
    /// Creates an empty builder that validates with [`DefaultValidator`].
    pub fn new() -> Self {
        Self::with_validator(DefaultValidator::default())
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Validator> TransactionBuilder<Unset, Unset, Unset, Unset, V> {
    /// Creates an empty builder that validates with `validator`.
    pub fn with_validator(validator: V) -> Self {
        Self {
            draft: Draft::default(),
            validator,
            _state: PhantomData,
        }
    }
}

impl<C, A, N, T, V> TransactionBuilder<C, A, N, T, V>
where
    C: FieldState,
    A: FieldState,
    N: FieldState,
    T: FieldState,
{
    /// Moves the draft and validator into a builder with different markers.
    fn retag<C2, A2, N2, T2>(self) -> TransactionBuilder<C2, A2, N2, T2, V> {
        TransactionBuilder {
            draft: self.draft,
            validator: self.validator,
            _state: PhantomData,
        }
    }

    /// Which required fields have been supplied so far.
    pub fn state(&self) -> BuilderState {
        BuilderState::of::<C, A, N, T>()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Sets the creator account (`name@domain`). Calling it again replaces
    /// the previous value.
    pub fn creator_account_id(
        self,
        account_id: impl Into<String>,
    ) -> TransactionBuilder<C, Set, N, T, V> {
        let account_id = account_id.into();
        if A::IS_SET {
            warn!(
                previous = %self.draft.creator_account_id,
                new = %account_id,
                "creator_account_id set twice; keeping the new value"
            );
        }
        let mut next = self.retag();
        next.draft.creator_account_id = account_id;
        next
    }

    /// Sets the creator's transaction counter. Calling it again replaces
    /// the previous value.
    pub fn tx_counter(self, tx_counter: u64) -> TransactionBuilder<C, A, Set, T, V> {
        if N::IS_SET {
            warn!(
                previous = self.draft.tx_counter,
                new = tx_counter,
                "tx_counter set twice; keeping the new value"
            );
        }
        let mut next = self.retag();
        next.draft.tx_counter = tx_counter;
        next
    }

    /// Sets the creation time (Unix milliseconds). Calling it again replaces
    /// the previous value.
    pub fn created_time(self, created_time: u64) -> TransactionBuilder<C, A, N, Set, V> {
        if T::IS_SET {
            warn!(
                previous = self.draft.created_time,
                new = created_time,
                "created_time set twice; keeping the new value"
            );
        }
        let mut next = self.retag();
        next.draft.created_time = created_time;
        next
    }

    /// Appends a command. Every command-specific method below funnels here.
    ///
    /// No validation happens at this point; that is the validator's job at
    /// build time.
    pub fn add_command(self, command: impl Into<Command>) -> TransactionBuilder<Set, A, N, T, V> {
        let command = command.into();
        trace!(
            command = command.name(),
            position = self.draft.commands.len(),
            "appending command"
        );
        let mut next = self.retag();
        next.draft.commands.push(command);
        next
    }

    /// Appends an `AddAssetQuantity`. `amount` is a decimal string such as
    /// `"12.50"`; a malformed one fails the call.
    pub fn add_asset_quantity(
        self,
        account_id: impl Into<String>,
        asset_id: impl Into<String>,
        amount: &str,
    ) -> Result<TransactionBuilder<Set, A, N, T, V>, BuildError> {
        let amount = Amount::parse(amount)?;
        Ok(self.add_command(AddAssetQuantity {
            account_id: account_id.into(),
            asset_id: asset_id.into(),
            amount,
        }))
    }

    pub fn add_peer(
        self,
        address: impl Into<String>,
        peer_key: PublicKey,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(AddPeer {
            address: address.into(),
            peer_key,
        })
    }

    pub fn add_signatory(
        self,
        account_id: impl Into<String>,
        public_key: PublicKey,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(AddSignatory {
            account_id: account_id.into(),
            public_key,
        })
    }

    pub fn remove_signatory(
        self,
        account_id: impl Into<String>,
        public_key: PublicKey,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(RemoveSignatory {
            account_id: account_id.into(),
            public_key,
        })
    }

    pub fn create_asset(
        self,
        asset_name: impl Into<String>,
        domain_id: impl Into<String>,
        precision: u8,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(CreateAsset {
            asset_name: asset_name.into(),
            domain_id: domain_id.into(),
            precision,
        })
    }

    pub fn create_account(
        self,
        account_name: impl Into<String>,
        domain_id: impl Into<String>,
        main_pubkey: PublicKey,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(CreateAccount {
            account_name: account_name.into(),
            domain_id: domain_id.into(),
            main_pubkey,
        })
    }

    pub fn create_domain(
        self,
        domain_id: impl Into<String>,
        default_role: impl Into<String>,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(CreateDomain {
            domain_id: domain_id.into(),
            default_role: default_role.into(),
        })
    }

    pub fn set_account_detail(
        self,
        account_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(SetAccountDetail {
            account_id: account_id.into(),
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn set_account_quorum(
        self,
        account_id: impl Into<String>,
        quorum: u32,
    ) -> TransactionBuilder<Set, A, N, T, V> {
        self.add_command(SetAccountQuorum {
            account_id: account_id.into(),
            quorum,
        })
    }

    /// Appends a `TransferAsset`. `amount` is parsed like in
    /// [`add_asset_quantity`](Self::add_asset_quantity).
    pub fn transfer_asset(
        self,
        src_account_id: impl Into<String>,
        dest_account_id: impl Into<String>,
        asset_id: impl Into<String>,
        description: impl Into<String>,
        amount: &str,
    ) -> Result<TransactionBuilder<Set, A, N, T, V>, BuildError> {
        let amount = Amount::parse(amount)?;
        Ok(self.add_command(TransferAsset {
            src_account_id: src_account_id.into(),
            dest_account_id: dest_account_id.into(),
            asset_id: asset_id.into(),
            description: description.into(),
            amount,
        }))
    }
}

impl<C, A, N, T, V> TransactionBuilder<C, A, N, T, V>
where
    C: FieldState,
    A: FieldState,
    N: FieldState,
    T: FieldState,
    V: Validator,
{
    /// Run-time checked counterpart of `build()`, callable in any state.
    ///
    /// For chains whose shape isn't known statically. Fails with
    /// [`BuildError::Incomplete`] listing the missing fields before the
    /// validator is consulted.
    pub fn try_build(&self) -> Result<UnsignedTransaction, BuildError> {
        let state = self.state();
        if !state.is_complete() {
            let missing = state.missing();
            debug!(missing = %join_fields(&missing), "refusing to build incomplete transaction");
            return Err(BuildError::Incomplete { missing });
        }
        finalize(&self.draft, &self.validator)
    }
}

impl<V: Validator> TransactionBuilder<Set, Set, Set, Set, V> {
    /// Validates the assembled transaction and returns it unsigned.
    ///
    /// # Errors
    ///
    /// [`BuildError::Validation`] with the validator's reason if it reports
    /// any errors. Nothing else is produced on that path.
    pub fn build(&self) -> Result<UnsignedTransaction, BuildError> {
        finalize(&self.draft, &self.validator)
    }
}

/// Snapshot, validate, wrap.
fn finalize<V: Validator>(
    draft: &Draft,
    validator: &V,
) -> Result<UnsignedTransaction, BuildError> {
    let tx = draft.snapshot();
    debug!(
        creator = %tx.payload.creator_account_id,
        tx_counter = tx.payload.tx_counter,
        commands = tx.payload.commands.len(),
        "validating transaction"
    );

    let answer = validator.validate(&tx);
    if answer.has_errors() {
        let reason = answer.reason();
        warn!(%reason, "transaction rejected by validator");
        return Err(BuildError::Validation(reason));
    }

    let unsigned = UnsignedTransaction::new(tx);
    debug!(hash = %unsigned.hash_hex(), "transaction built");
    Ok(unsigned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Answer;

    fn accept_all(_: &Transaction) -> Answer {
        Answer::new()
    }

    fn key() -> PublicKey {
        PublicKey::from_bytes([9u8; 32])
    }

    #[test]
    fn new_builder_is_empty() {
        let builder = TransactionBuilder::new();
        assert_eq!(builder.state(), BuilderState::EMPTY);
        assert_eq!(builder.draft(), &Draft::default());
    }

    #[test]
    fn each_setter_adds_its_bit() {
        let builder = TransactionBuilder::with_validator(accept_all);
        let builder = builder.tx_counter(1);
        assert_eq!(builder.state().missing().len(), 3);
        assert!(builder.state().contains(RequiredField::TxCounter));

        let builder = builder.created_time(1_000);
        assert!(builder.state().contains(RequiredField::CreatedTime));

        let builder = builder.creator_account_id("a@domain");
        assert!(builder.state().contains(RequiredField::CreatorAccountId));

        let builder = builder.create_domain("domain", "user");
        assert!(builder.state().is_complete());
    }

    #[test]
    fn second_command_keeps_state_and_appends() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .create_domain("domain", "user");
        let state = builder.state();
        let builder = builder.set_account_quorum("a@domain", 2);
        assert_eq!(builder.state(), state);
        assert_eq!(builder.draft().commands().len(), 2);
        assert_eq!(builder.draft().commands()[0].name(), "CreateDomain");
        assert_eq!(builder.draft().commands()[1].name(), "SetAccountQuorum");
    }

    #[test]
    fn scalar_setters_overwrite() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("first@domain")
            .creator_account_id("second@domain")
            .tx_counter(1)
            .tx_counter(2)
            .created_time(10)
            .created_time(20);
        let draft = builder.draft();
        assert_eq!(draft.creator_account_id(), "second@domain");
        assert_eq!(draft.tx_counter(), 2);
        assert_eq!(draft.created_time(), 20);
    }

    #[test]
    fn cloned_builders_are_independent() {
        let base = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("a@domain")
            .tx_counter(1)
            .created_time(1_000)
            .create_domain("domain", "user");

        let left = base.clone().set_account_quorum("a@domain", 2);
        let right = base.clone().add_signatory("a@domain", key());

        assert_eq!(base.draft().commands().len(), 1);
        assert_eq!(left.draft().commands()[1].name(), "SetAccountQuorum");
        assert_eq!(right.draft().commands()[1].name(), "AddSignatory");
    }

    #[test]
    fn malformed_amount_fails_the_call() {
        let result = TransactionBuilder::with_validator(accept_all).add_asset_quantity(
            "a@domain",
            "coin#domain",
            "12,5",
        );
        assert!(matches!(
            result,
            Err(BuildError::Amount(AmountError::InvalidCharacter { ch: ',', .. }))
        ));

        let result = TransactionBuilder::with_validator(accept_all).transfer_asset(
            "a@domain",
            "b@domain",
            "coin#domain",
            "",
            "",
        );
        assert!(matches!(result, Err(BuildError::Amount(AmountError::Empty))));
    }

    #[test]
    fn amount_is_parsed_into_command() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .add_asset_quantity("a@domain", "coin#domain", "3.14")
            .unwrap();
        match &builder.draft().commands()[0] {
            Command::AddAssetQuantity(c) => assert_eq!(c.amount, Amount::new(314, 2)),
            other => panic!("unexpected command {other}"),
        }
    }

    #[test]
    fn build_snapshots_the_draft() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("a@domain")
            .tx_counter(7)
            .created_time(1_000)
            .create_domain("domain", "user");
        let unsigned = builder.build().unwrap();
        assert_eq!(unsigned.transaction(), &builder.draft().snapshot());
    }

    #[test]
    fn build_is_repeatable() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("a@domain")
            .tx_counter(7)
            .created_time(1_000)
            .create_domain("domain", "user");
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn validator_rejection_carries_reason() {
        let result = TransactionBuilder::with_validator(|_: &Transaction| Answer::error("bad"))
            .creator_account_id("a@domain")
            .tx_counter(1)
            .created_time(1_000)
            .create_domain("domain", "user")
            .build();
        assert_eq!(result, Err(BuildError::Validation("bad".to_string())));
    }

    #[test]
    fn try_build_lists_missing_fields() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("a@domain")
            .created_time(1_000);
        assert_eq!(
            builder.try_build(),
            Err(BuildError::Incomplete {
                missing: vec![RequiredField::Command, RequiredField::TxCounter]
            })
        );
    }

    #[test]
    fn try_build_succeeds_when_complete() {
        let builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("a@domain")
            .tx_counter(1)
            .created_time(1_000)
            .create_domain("domain", "user");
        assert_eq!(builder.try_build(), builder.build());
    }

    #[test]
    fn incomplete_error_message_names_fields() {
        let err = BuildError::Incomplete {
            missing: vec![RequiredField::TxCounter, RequiredField::CreatedTime],
        };
        assert_eq!(
            err.to_string(),
            "required fields are not set: tx_counter, created_time"
        );
    }

    #[test]
    fn ready_builder_alias_names_complete_state() {
        let builder: ReadyBuilder<fn(&Transaction) -> Answer> =
            TransactionBuilder::with_validator(accept_all as fn(&Transaction) -> Answer)
                .creator_account_id("a@domain")
                .tx_counter(1)
                .created_time(1_000)
                .create_domain("domain", "user");
        assert!(builder.build().is_ok());
    }
}
