//! Validator verdicts.
//!
//! An [`Answer`] is a list of [`ReasonsGroup`]s: one group per thing that was
//! checked ("Transaction", "TransferAsset #2", ...), each with the messages
//! for every rule that thing broke. Empty groups are dropped on insertion, so
//! `has_errors()` is just "is there any group".

use std::fmt;

/// Error messages about one validated entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonsGroup {
    /// What the messages are about. May be empty.
    pub name: String,
    pub errors: Vec<String>,
}

impl ReasonsGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ReasonsGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{}: ", self.name)?;
        }
        write!(f, "{}", self.errors.join(", "))
    }
}

/// The outcome of validating one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    groups: Vec<ReasonsGroup>,
}

impl Answer {
    /// An answer with no errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// An answer carrying a single, unnamed error message. `reason()` returns
    /// `message` unchanged.
    pub fn error(message: impl Into<String>) -> Self {
        let mut group = ReasonsGroup::default();
        group.push(message);
        let mut answer = Self::new();
        answer.add_group(group);
        answer
    }

    /// Adds a group. Groups without errors are ignored.
    pub fn add_group(&mut self, group: ReasonsGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Human-readable summary of every error, groups separated by `"; "`.
    /// Empty when there are no errors.
    pub fn reason(&self) -> String {
        self.groups
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn groups(&self) -> &[ReasonsGroup] {
        &self.groups
    }
}
