//! Stateless field validation.
//!
//! [`DefaultValidator`] checks everything that can be checked without
//! looking at ledger state: identifier formats, ranges, lengths, and the
//! creation time against the local clock. Whether `alice@test` actually
//! exists, or has the funds she's transferring, is for the ledger to decide.
//!
//! Unlike a fail-fast verifier, it reports every violation it finds, grouped
//! per command, so a client fixing a rejected transaction sees all of its
//! problems at once.

use chrono::Utc;

use super::answer::{Answer, ReasonsGroup};
use super::Validator;
use crate::config::{
    ValidationConfig, ACCOUNT_ID_SEPARATOR, ASSET_ID_SEPARATOR, MAX_DETAIL_KEY_LENGTH,
    MAX_DOMAIN_LABEL_LENGTH, MAX_NAME_LENGTH, MAX_ROLE_NAME_LENGTH,
};
use crate::transaction::command::Command;
use crate::transaction::payload::Transaction;
use crate::transaction::types::Amount;

/// The validator builders use unless told otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultValidator {
    config: ValidationConfig,
}

impl DefaultValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validates `tx` as if the current time were `now_ms` (Unix millis).
    ///
    /// [`Validator::validate`] calls this with the wall clock.
    pub fn validate_at(&self, tx: &Transaction, now_ms: u64) -> Answer {
        let payload = &tx.payload;
        let mut answer = Answer::new();

        let mut tx_reasons = ReasonsGroup::new("Transaction");
        check_account_id(&mut tx_reasons, "creator_account_id", &payload.creator_account_id);
        if payload.tx_counter == 0 {
            tx_reasons.push("tx_counter must be greater than 0");
        }
        self.check_created_time(&mut tx_reasons, payload.created_time, now_ms);
        if payload.commands.is_empty() {
            tx_reasons.push("transaction must contain at least one command");
        }
        if payload.commands.len() > self.config.max_commands {
            tx_reasons.push(format!(
                "transaction has {} commands (max {})",
                payload.commands.len(),
                self.config.max_commands
            ));
        }
        answer.add_group(tx_reasons);

        for (index, command) in payload.commands.iter().enumerate() {
            let mut reasons = ReasonsGroup::new(format!("{} #{}", command.name(), index));
            self.check_command(&mut reasons, command);
            answer.add_group(reasons);
        }

        answer
    }

    fn check_created_time(&self, reasons: &mut ReasonsGroup, created_time: u64, now_ms: u64) {
        let max_future = self.config.max_future_ms();
        let max_past = self.config.max_past_ms();

        if created_time > now_ms.saturating_add(max_future) {
            reasons.push(format!(
                "created_time {} is {}ms in the future (max {}ms)",
                created_time,
                created_time - now_ms,
                max_future
            ));
        } else if created_time < now_ms.saturating_sub(max_past) {
            reasons.push(format!(
                "created_time {} is {}ms old (max {}ms)",
                created_time,
                now_ms - created_time,
                max_past
            ));
        }
    }

    fn check_command(&self, reasons: &mut ReasonsGroup, command: &Command) {
        match command {
            Command::AddAssetQuantity(c) => {
                check_account_id(reasons, "account_id", &c.account_id);
                check_asset_id(reasons, "asset_id", &c.asset_id);
                check_amount(reasons, &c.amount);
            }
            Command::AddPeer(c) => check_peer_address(reasons, &c.address),
            Command::AddSignatory(c) => check_account_id(reasons, "account_id", &c.account_id),
            Command::RemoveSignatory(c) => check_account_id(reasons, "account_id", &c.account_id),
            Command::CreateAsset(c) => {
                check_name(reasons, "asset_name", &c.asset_name);
                check_domain_id(reasons, "domain_id", &c.domain_id);
                if c.precision > self.config.max_precision {
                    reasons.push(format!(
                        "precision {} exceeds maximum {}",
                        c.precision, self.config.max_precision
                    ));
                }
            }
            Command::CreateAccount(c) => {
                check_name(reasons, "account_name", &c.account_name);
                check_domain_id(reasons, "domain_id", &c.domain_id);
            }
            Command::CreateDomain(c) => {
                check_domain_id(reasons, "domain_id", &c.domain_id);
                check_role_id(reasons, &c.default_role);
            }
            Command::SetAccountDetail(c) => {
                check_account_id(reasons, "account_id", &c.account_id);
                check_detail_key(reasons, &c.key);
                if c.value.len() > self.config.max_detail_value_len {
                    reasons.push(format!(
                        "detail value is {} bytes (max {})",
                        c.value.len(),
                        self.config.max_detail_value_len
                    ));
                }
            }
            Command::SetAccountQuorum(c) => {
                check_account_id(reasons, "account_id", &c.account_id);
                if c.quorum == 0 || c.quorum > self.config.max_quorum {
                    reasons.push(format!(
                        "quorum {} is outside 1..={}",
                        c.quorum, self.config.max_quorum
                    ));
                }
            }
            Command::TransferAsset(c) => {
                check_account_id(reasons, "src_account_id", &c.src_account_id);
                check_account_id(reasons, "dest_account_id", &c.dest_account_id);
                check_asset_id(reasons, "asset_id", &c.asset_id);
                check_amount(reasons, &c.amount);
                if c.src_account_id == c.dest_account_id {
                    reasons.push(format!(
                        "source and destination must differ: both are '{}'",
                        c.src_account_id
                    ));
                }
                if c.description.len() > self.config.max_description_len {
                    reasons.push(format!(
                        "description is {} bytes (max {})",
                        c.description.len(),
                        self.config.max_description_len
                    ));
                }
            }
        }
    }
}

impl Validator for DefaultValidator {
    fn validate(&self, tx: &Transaction) -> Answer {
        let now_ms = Utc::now().timestamp_millis().max(0) as u64;
        self.validate_at(tx, now_ms)
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// `[a-z0-9_]{1,32}`
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Dot-separated DNS-style labels.
fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= MAX_DOMAIN_LABEL_LENGTH
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

/// `name<sep>domain`, exactly one separator.
fn is_valid_qualified_id(id: &str, separator: char) -> bool {
    match id.split_once(separator) {
        Some((name, domain)) => {
            !domain.contains(separator) && is_valid_name(name) && is_valid_domain(domain)
        }
        None => false,
    }
}

fn check_account_id(reasons: &mut ReasonsGroup, field: &str, account_id: &str) {
    if !is_valid_qualified_id(account_id, ACCOUNT_ID_SEPARATOR) {
        reasons.push(format!(
            "invalid {} '{}': expected name{}domain",
            field, account_id, ACCOUNT_ID_SEPARATOR
        ));
    }
}

fn check_asset_id(reasons: &mut ReasonsGroup, field: &str, asset_id: &str) {
    if !is_valid_qualified_id(asset_id, ASSET_ID_SEPARATOR) {
        reasons.push(format!(
            "invalid {} '{}': expected name{}domain",
            field, asset_id, ASSET_ID_SEPARATOR
        ));
    }
}

fn check_name(reasons: &mut ReasonsGroup, field: &str, name: &str) {
    if !is_valid_name(name) {
        reasons.push(format!(
            "invalid {} '{}': expected 1-{} of [a-z0-9_]",
            field, name, MAX_NAME_LENGTH
        ));
    }
}

fn check_domain_id(reasons: &mut ReasonsGroup, field: &str, domain_id: &str) {
    if !is_valid_domain(domain_id) {
        reasons.push(format!("invalid {} '{}'", field, domain_id));
    }
}

fn check_role_id(reasons: &mut ReasonsGroup, role: &str) {
    let valid = !role.is_empty()
        && role.len() <= MAX_ROLE_NAME_LENGTH
        && role
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if !valid {
        reasons.push(format!(
            "invalid default_role '{}': expected 1-{} of [a-z0-9_]",
            role, MAX_ROLE_NAME_LENGTH
        ));
    }
}

fn check_detail_key(reasons: &mut ReasonsGroup, key: &str) {
    let valid = !key.is_empty()
        && key.len() <= MAX_DETAIL_KEY_LENGTH
        && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if !valid {
        reasons.push(format!(
            "invalid detail key '{}': expected 1-{} of [A-Za-z0-9_]",
            key, MAX_DETAIL_KEY_LENGTH
        ));
    }
}

fn check_amount(reasons: &mut ReasonsGroup, amount: &Amount) {
    if amount.is_zero() {
        reasons.push("amount must be greater than 0");
    }
}

/// `host:port`, port in 1..=65535.
fn check_peer_address(reasons: &mut ReasonsGroup, address: &str) {
    let valid = match address.rsplit_once(':') {
        Some((host, port)) => {
            !host.is_empty()
                && !host.chars().any(char::is_whitespace)
                && matches!(port.parse::<u16>(), Ok(p) if p > 0)
        }
        None => false,
    };
    if !valid {
        reasons.push(format!(
            "invalid peer address '{}': expected host:port",
            address
        ));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PublicKey;
    use crate::transaction::command::{
        AddAssetQuantity, AddPeer, CreateAccount, CreateAsset, CreateDomain, SetAccountDetail,
        SetAccountQuorum, TransferAsset,
    };
    use crate::transaction::payload::Payload;

    const NOW: u64 = 1_700_000_000_000;

    fn tx_with(commands: Vec<Command>) -> Transaction {
        Transaction {
            payload: Payload {
                creator_account_id: "admin@test".into(),
                tx_counter: 1,
                created_time: NOW,
                commands,
            },
        }
    }

    fn domain() -> Command {
        CreateDomain {
            domain_id: "test".into(),
            default_role: "user".into(),
        }
        .into()
    }

    fn validate(tx: &Transaction) -> Answer {
        DefaultValidator::default().validate_at(tx, NOW)
    }

    #[test]
    fn accepts_well_formed_transaction() {
        let tx = tx_with(vec![
            domain(),
            CreateAccount {
                account_name: "alice".into(),
                domain_id: "test".into(),
                main_pubkey: PublicKey::from_bytes([1; 32]),
            }
            .into(),
            AddPeer {
                address: "127.0.0.1:10001".into(),
                peer_key: PublicKey::from_bytes([2; 32]),
            }
            .into(),
            TransferAsset {
                src_account_id: "admin@test".into(),
                dest_account_id: "alice@test".into(),
                asset_id: "coin#test".into(),
                description: "welcome".into(),
                amount: Amount::new(100, 2),
            }
            .into(),
        ]);
        let answer = validate(&tx);
        assert!(!answer.has_errors(), "{}", answer.reason());
    }

    #[test]
    fn rejects_zero_counter() {
        let mut tx = tx_with(vec![domain()]);
        tx.payload.tx_counter = 0;
        let answer = validate(&tx);
        assert!(answer.reason().contains("tx_counter"));
    }

    #[test]
    fn rejects_empty_command_list() {
        let answer = validate(&tx_with(vec![]));
        assert!(answer.reason().contains("at least one command"));
    }

    #[test]
    fn rejects_too_many_commands() {
        let validator = DefaultValidator::new(ValidationConfig {
            max_commands: 2,
            ..ValidationConfig::default()
        });
        let answer = validator.validate_at(&tx_with(vec![domain(), domain(), domain()]), NOW);
        assert!(answer.reason().contains("3 commands (max 2)"));
    }

    #[test]
    fn rejects_malformed_creator() {
        for creator in ["admin", "admin@", "@test", "Admin@test", "a@b@c", "admin@-test"] {
            let mut tx = tx_with(vec![domain()]);
            tx.payload.creator_account_id = creator.into();
            assert!(validate(&tx).has_errors(), "{creator} should be rejected");
        }
    }

    #[test]
    fn accepts_dotted_domains() {
        let mut tx = tx_with(vec![domain()]);
        tx.payload.creator_account_id = "admin@ru.test-net".into();
        assert!(!validate(&tx).has_errors());
    }

    #[test]
    fn rejects_future_and_stale_timestamps() {
        let config = ValidationConfig::default();

        let mut tx = tx_with(vec![domain()]);
        tx.payload.created_time = NOW + config.max_future_ms() + 1;
        assert!(validate(&tx).reason().contains("in the future"));

        tx.payload.created_time = NOW - config.max_past_ms() - 1;
        assert!(validate(&tx).reason().contains("old"));

        tx.payload.created_time = NOW + config.max_future_ms();
        assert!(!validate(&tx).has_errors());
    }

    #[test]
    fn reports_every_error_grouped_by_command() {
        let mut tx = tx_with(vec![
            domain(),
            SetAccountQuorum {
                account_id: "admin@test".into(),
                quorum: 0,
            }
            .into(),
            AddPeer {
                address: "no-port".into(),
                peer_key: PublicKey::from_bytes([2; 32]),
            }
            .into(),
        ]);
        tx.payload.tx_counter = 0;

        let answer = validate(&tx);
        let names: Vec<&str> = answer.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Transaction", "SetAccountQuorum #1", "AddPeer #2"]);
    }

    #[test]
    fn rejects_zero_amounts() {
        let tx = tx_with(vec![AddAssetQuantity {
            account_id: "admin@test".into(),
            asset_id: "coin#test".into(),
            amount: Amount::new(0, 2),
        }
        .into()]);
        assert!(validate(&tx).reason().contains("amount must be greater than 0"));
    }

    #[test]
    fn rejects_self_transfer_and_long_description() {
        let tx = tx_with(vec![TransferAsset {
            src_account_id: "admin@test".into(),
            dest_account_id: "admin@test".into(),
            asset_id: "coin#test".into(),
            description: "x".repeat(65),
            amount: Amount::new(1, 0),
        }
        .into()]);
        let answer = validate(&tx);
        assert_eq!(answer.groups()[0].errors.len(), 2);
    }

    #[test]
    fn rejects_bad_asset_definitions() {
        let validator = DefaultValidator::new(ValidationConfig {
            max_precision: 18,
            ..ValidationConfig::default()
        });
        let tx = tx_with(vec![CreateAsset {
            asset_name: "Coin".into(),
            domain_id: "test".into(),
            precision: 19,
        }
        .into()]);
        let answer = validator.validate_at(&tx, NOW);
        assert_eq!(answer.groups()[0].errors.len(), 2);
    }

    #[test]
    fn rejects_bad_detail_key() {
        let tx = tx_with(vec![SetAccountDetail {
            account_id: "admin@test".into(),
            key: "bad key".into(),
            value: "v".into(),
        }
        .into()]);
        assert!(validate(&tx).reason().contains("invalid detail key"));
    }

    #[test]
    fn peer_address_rules() {
        let mut ok = ReasonsGroup::default();
        check_peer_address(&mut ok, "localhost:50541");
        check_peer_address(&mut ok, "[::1]:80");
        assert!(ok.is_empty());

        for bad in ["localhost", ":80", "host:0", "host:70000", "ho st:80"] {
            let mut reasons = ReasonsGroup::default();
            check_peer_address(&mut reasons, bad);
            assert!(!reasons.is_empty(), "{bad} should be rejected");
        }
    }

    #[test]
    fn wall_clock_validation_accepts_current_time() {
        let mut tx = tx_with(vec![domain()]);
        tx.payload.created_time = Utc::now().timestamp_millis() as u64;
        assert!(!DefaultValidator::default().validate(&tx).has_errors());
    }
}
