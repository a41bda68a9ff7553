//! Type-level bookkeeping for [`super::builder::TransactionBuilder`].
//!
//! Every mandatory field gets its own phantom type parameter on the builder,
//! either [`Unset`] or [`Set`]. Setters flip their parameter to `Set`;
//! `build()` is only defined when all four are `Set`. [`BuilderState`] is the
//! same information as a run-time bit set, for diagnostics and for the
//! dynamically checked `try_build()` path.

use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Set {}
    impl Sealed for super::Unset {}
}

/// Marker for "has this field been supplied yet". Implemented only by
/// [`Set`] and [`Unset`].
pub trait FieldState: sealed::Sealed {
    /// `true` for [`Set`].
    const IS_SET: bool;
}

/// The field has been supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Set;

/// The field has not been supplied yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unset;

impl FieldState for Set {
    const IS_SET: bool = true;
}

impl FieldState for Unset {
    const IS_SET: bool = false;
}

// ---------------------------------------------------------------------------
// RequiredField
// ---------------------------------------------------------------------------

/// The fields a transaction can't be finalized without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequiredField {
    /// At least one command.
    Command,
    CreatorAccountId,
    TxCounter,
    CreatedTime,
}

impl RequiredField {
    /// All required fields, in declaration order.
    pub const ALL: [RequiredField; 4] = [
        RequiredField::Command,
        RequiredField::CreatorAccountId,
        RequiredField::TxCounter,
        RequiredField::CreatedTime,
    ];

    /// The bit this field occupies in a [`BuilderState`].
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::CreatorAccountId => write!(f, "creator_account_id"),
            Self::TxCounter => write!(f, "tx_counter"),
            Self::CreatedTime => write!(f, "created_time"),
        }
    }
}

// ---------------------------------------------------------------------------
// BuilderState
// ---------------------------------------------------------------------------

/// The set of required fields supplied so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BuilderState(u8);

impl BuilderState {
    /// Nothing supplied.
    pub const EMPTY: BuilderState = BuilderState(0);

    /// Everything supplied; the only state `build()` accepts.
    pub const COMPLETE: BuilderState = BuilderState((1 << RequiredField::ALL.len()) - 1);

    /// Reads the state off the builder's type parameters.
    pub fn of<C: FieldState, A: FieldState, N: FieldState, T: FieldState>() -> Self {
        let mut state = Self::EMPTY;
        let flags = [C::IS_SET, A::IS_SET, N::IS_SET, T::IS_SET];
        for (field, is_set) in RequiredField::ALL.into_iter().zip(flags) {
            if is_set {
                state = state.with(field);
            }
        }
        state
    }

    /// This state plus `field`.
    pub const fn with(self, field: RequiredField) -> Self {
        Self(self.0 | field.bit())
    }

    pub const fn union(self, other: BuilderState) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, field: RequiredField) -> bool {
        self.0 & field.bit() != 0
    }

    pub const fn is_complete(self) -> bool {
        self.0 == Self::COMPLETE.0
    }

    /// Fields still missing, in declaration order.
    pub fn missing(self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }

    /// Raw bits, `Command` in the lowest position.
    pub const fn bits(self) -> u8 {
        self.0
    }
}
