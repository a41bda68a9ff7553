//! Walks one transaction through the builder: assemble, validate with the
//! default validator, print the result, then show a rejected build.
//!
//! Run with:
//!   RUST_LOG=ledger_protocol=debug cargo run --example demo

use anyhow::Context;

use ledger_protocol::crypto::PublicKey;
use ledger_protocol::logging::{init_logging, LogFormat};
use ledger_protocol::transaction::{BuildError, TransactionBuilder};

fn main() -> anyhow::Result<()> {
    let format = std::env::var("LOG_FORMAT")
        .map(|s| LogFormat::from_str_lossy(&s))
        .unwrap_or(LogFormat::Pretty);
    init_logging("info", format).context("installing log subscriber")?;

    let now_ms = chrono::Utc::now().timestamp_millis() as u64;
    let alice_key = PublicKey::from_hex(&"a1".repeat(32))?;

    let unsigned = TransactionBuilder::new()
        .creator_account_id("admin@test")
        .tx_counter(1)
        .created_time(now_ms)
        .create_domain("test", "user")
        .create_asset("coin", "test", 2)
        .create_account("alice", "test", alice_key)
        .add_asset_quantity("admin@test", "coin#test", "1000.00")?
        .transfer_asset("admin@test", "alice@test", "coin#test", "welcome", "25.00")?
        .build()
        .context("building the onboarding transaction")?;

    println!("built transaction {}", unsigned.hash_hex());
    println!("  creator:  {}", unsigned.creator_account_id());
    println!("  counter:  {}", unsigned.tx_counter());
    for (index, command) in unsigned.commands().iter().enumerate() {
        println!("  #{index}: {command}");
    }
    println!("{}", serde_json::to_string_pretty(&unsigned)?);

    // Same shape, but self-transfer of a zero amount.
    let rejected = TransactionBuilder::new()
        .creator_account_id("admin@test")
        .tx_counter(2)
        .created_time(now_ms)
        .transfer_asset("admin@test", "admin@test", "coin#test", "", "0")?
        .build();

    match rejected {
        Err(BuildError::Validation(reason)) => println!("rejected as expected: {reason}"),
        other => anyhow::bail!("expected a validation failure, got {other:?}"),
    }

    Ok(())
}
