//! # Protocol Configuration & Constants
//!
//! Every limit the stateless validator enforces lives here, either as a bare
//! constant or folded into [`ValidationConfig`]. If you're hardcoding one of
//! these numbers somewhere else, move it here.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Public key length in bytes. Ed25519 verifying keys are 32 bytes, and so
/// is every key the ledger stores for peers and signatories.
pub const PUBLIC_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// How far into the future a transaction's `created_time` may lie. Covers
/// clock drift between the client and the validating peer.
pub const MAX_FUTURE_DRIFT: Duration = Duration::from_secs(5 * 60);

/// How old a transaction's `created_time` may be before it is considered
/// stale. One day.
pub const MAX_TX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// Maximum number of commands in a single transaction. Keeps validation and
/// execution bounded.
pub const MAX_COMMANDS_PER_TX: usize = 1_024;

/// Maximum signatory quorum an account may require.
pub const MAX_QUORUM: u32 = 128;

/// Maximum number of fractional digits an asset may be created with.
pub const MAX_ASSET_PRECISION: u8 = 255;

/// Maximum length of a transfer description, in bytes.
pub const MAX_DESCRIPTION_LENGTH: usize = 64;

/// Maximum length of an account detail value, in bytes.
pub const MAX_DETAIL_VALUE_LENGTH: usize = 4 * 1024;

// ---------------------------------------------------------------------------
// Identifier Formats
// ---------------------------------------------------------------------------

/// Separator between account name and domain: `alice@wonderland`.
pub const ACCOUNT_ID_SEPARATOR: char = '@';

/// Separator between asset name and domain: `coin#wonderland`.
pub const ASSET_ID_SEPARATOR: char = '#';

/// Maximum length of an account or asset name.
pub const MAX_NAME_LENGTH: usize = 32;

/// Maximum length of a role name.
pub const MAX_ROLE_NAME_LENGTH: usize = 45;

/// Maximum length of an account detail key.
pub const MAX_DETAIL_KEY_LENGTH: usize = 64;

/// Maximum length of a single domain label (DNS rules).
pub const MAX_DOMAIN_LABEL_LENGTH: usize = 63;

// ---------------------------------------------------------------------------
// ValidationConfig
// ---------------------------------------------------------------------------

/// Tunable limits for [`crate::validation::DefaultValidator`].
///
/// `Default` yields the constants above. Deployments that want stricter (or
/// looser) limits build their own and hand it to
/// [`crate::validation::DefaultValidator::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Tolerated clock drift into the future.
    pub max_future: Duration,
    /// Maximum age of a transaction.
    pub max_past: Duration,
    /// Maximum number of commands per transaction.
    pub max_commands: usize,
    /// Upper bound (inclusive) for `SetAccountQuorum`.
    pub max_quorum: u32,
    /// Upper bound (inclusive) for `CreateAsset` precision.
    pub max_precision: u8,
    /// Upper bound for `TransferAsset` descriptions, in bytes.
    pub max_description_len: usize,
    /// Upper bound for `SetAccountDetail` values, in bytes.
    pub max_detail_value_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_future: MAX_FUTURE_DRIFT,
            max_past: MAX_TX_AGE,
            max_commands: MAX_COMMANDS_PER_TX,
            max_quorum: MAX_QUORUM,
            max_precision: MAX_ASSET_PRECISION,
            max_description_len: MAX_DESCRIPTION_LENGTH,
            max_detail_value_len: MAX_DETAIL_VALUE_LENGTH,
        }
    }
}

impl ValidationConfig {
    /// `max_future` in milliseconds, the unit `created_time` is expressed in.
    pub fn max_future_ms(&self) -> u64 {
        self.max_future.as_millis() as u64
    }

    /// `max_past` in milliseconds.
    pub fn max_past_ms(&self) -> u64 {
        self.max_past.as_millis() as u64
    }
}
