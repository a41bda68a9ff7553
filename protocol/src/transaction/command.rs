//! The commands a transaction carries.
//!
//! Each kind of command is its own struct with every field public and
//! mandatory, so a command can't be appended half-built. [`Command`] is the
//! closed sum over them and maps one-to-one onto the wire representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::Amount;
use crate::crypto::keys::PublicKey;

/// Mint `amount` of `asset_id` into `account_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAssetQuantity {
    pub account_id: String,
    pub asset_id: String,
    pub amount: Amount,
}

/// Register a new peer in the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPeer {
    /// `host:port` the peer listens on.
    pub address: String,
    pub peer_key: PublicKey,
}

/// Attach a signatory key to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSignatory {
    pub account_id: String,
    pub public_key: PublicKey,
}

/// Detach a signatory key from an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveSignatory {
    pub account_id: String,
    pub public_key: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAsset {
    pub asset_name: String,
    pub domain_id: String,
    /// Number of fractional digits quantities of this asset carry.
    pub precision: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccount {
    pub account_name: String,
    pub domain_id: String,
    pub main_pubkey: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDomain {
    pub domain_id: String,
    /// Role granted to accounts created in this domain.
    pub default_role: String,
}

/// Store a key/value pair in an account's detail map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAccountDetail {
    pub account_id: String,
    pub key: String,
    pub value: String,
}

/// Set how many signatures an account's transactions require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetAccountQuorum {
    pub account_id: String,
    pub quorum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAsset {
    pub src_account_id: String,
    pub dest_account_id: String,
    pub asset_id: String,
    pub description: String,
    pub amount: Amount,
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// One operation in a transaction's ordered command list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    AddAssetQuantity(AddAssetQuantity),
    AddPeer(AddPeer),
    AddSignatory(AddSignatory),
    RemoveSignatory(RemoveSignatory),
    CreateAsset(CreateAsset),
    CreateAccount(CreateAccount),
    CreateDomain(CreateDomain),
    SetAccountDetail(SetAccountDetail),
    SetAccountQuorum(SetAccountQuorum),
    TransferAsset(TransferAsset),
}

impl Command {
    /// Human-readable command name, used in logs and validator reasons.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddAssetQuantity(_) => "AddAssetQuantity",
            Self::AddPeer(_) => "AddPeer",
            Self::AddSignatory(_) => "AddSignatory",
            Self::RemoveSignatory(_) => "RemoveSignatory",
            Self::CreateAsset(_) => "CreateAsset",
            Self::CreateAccount(_) => "CreateAccount",
            Self::CreateDomain(_) => "CreateDomain",
            Self::SetAccountDetail(_) => "SetAccountDetail",
            Self::SetAccountQuorum(_) => "SetAccountQuorum",
            Self::TransferAsset(_) => "TransferAsset",
        }
    }

    /// Stable one-byte discriminant used in the canonical encoding.
    ///
    /// Never renumber these: the transaction hash depends on them.
    pub fn tag(&self) -> u8 {
        match self {
            Self::AddAssetQuantity(_) => 0x01,
            Self::AddPeer(_) => 0x02,
            Self::AddSignatory(_) => 0x03,
            Self::RemoveSignatory(_) => 0x04,
            Self::CreateAsset(_) => 0x05,
            Self::CreateAccount(_) => 0x06,
            Self::CreateDomain(_) => 0x07,
            Self::SetAccountDetail(_) => 0x08,
            Self::SetAccountQuorum(_) => 0x09,
            Self::TransferAsset(_) => 0x0A,
        }
    }

    /// Appends the canonical encoding of this command to `buf`: the tag byte,
    /// then each field in declaration order.
    pub(crate) fn write_signable(&self, buf: &mut Vec<u8>) {
        buf.push(self.tag());
        match self {
            Self::AddAssetQuantity(c) => {
                put_str(buf, &c.account_id);
                put_str(buf, &c.asset_id);
                put_amount(buf, &c.amount);
            }
            Self::AddPeer(c) => {
                put_str(buf, &c.address);
                put_key(buf, &c.peer_key);
            }
            Self::AddSignatory(c) => {
                put_str(buf, &c.account_id);
                put_key(buf, &c.public_key);
            }
            Self::RemoveSignatory(c) => {
                put_str(buf, &c.account_id);
                put_key(buf, &c.public_key);
            }
            Self::CreateAsset(c) => {
                put_str(buf, &c.asset_name);
                put_str(buf, &c.domain_id);
                buf.push(c.precision);
            }
            Self::CreateAccount(c) => {
                put_str(buf, &c.account_name);
                put_str(buf, &c.domain_id);
                put_key(buf, &c.main_pubkey);
            }
            Self::CreateDomain(c) => {
                put_str(buf, &c.domain_id);
                put_str(buf, &c.default_role);
            }
            Self::SetAccountDetail(c) => {
                put_str(buf, &c.account_id);
                put_str(buf, &c.key);
                put_str(buf, &c.value);
            }
            Self::SetAccountQuorum(c) => {
                put_str(buf, &c.account_id);
                buf.extend_from_slice(&c.quorum.to_le_bytes());
            }
            Self::TransferAsset(c) => {
                put_str(buf, &c.src_account_id);
                put_str(buf, &c.dest_account_id);
                put_str(buf, &c.asset_id);
                put_str(buf, &c.description);
                put_amount(buf, &c.amount);
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Strings and keys are u32-length-prefixed, amounts fixed-width. Free-text
// fields may hold any byte, NUL included, so nothing is terminator-delimited.

pub(crate) fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn put_key(buf: &mut Vec<u8>, key: &PublicKey) {
    let bytes = key.as_bytes();
    buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    buf.extend_from_slice(bytes);
}

fn put_amount(buf: &mut Vec<u8>, amount: &Amount) {
    buf.extend_from_slice(&amount.value().to_le_bytes());
    buf.push(amount.precision());
}

macro_rules! impl_from_command {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Command {
                fn from(command: $kind) -> Self {
                    Self::$kind(command)
                }
            }
        )*
    };
}

impl_from_command!(
    AddAssetQuantity,
    AddPeer,
    AddSignatory,
    RemoveSignatory,
    CreateAsset,
    CreateAccount,
    CreateDomain,
    SetAccountDetail,
    SetAccountQuorum,
    TransferAsset,
);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
