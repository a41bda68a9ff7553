// Transaction builder benchmarks.
//
// Covers chain assembly, full builds with a permissive and with the default
// validator, and hashing at various command counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ledger_protocol::crypto::PublicKey;
use ledger_protocol::transaction::{Transaction, TransactionBuilder};
use ledger_protocol::validation::{Answer, DefaultValidator, Validator};

const NOW_MS: u64 = 1_700_000_000_000;

fn accept_all(_: &Transaction) -> Answer {
    Answer::new()
}

fn bench_build_single_command(c: &mut Criterion) {
    let key = PublicKey::from_bytes([7u8; 32]);

    c.bench_function("builder/build_add_peer", |b| {
        b.iter(|| {
            TransactionBuilder::with_validator(accept_all)
                .creator_account_id("admin@test")
                .tx_counter(1)
                .created_time(NOW_MS)
                .add_peer("127.0.0.1:10001", key)
                .build()
                .unwrap()
        });
    });
}

fn bench_build_many_commands(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/build_transfers");

    for size in [1u64, 10, 100, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut builder = TransactionBuilder::with_validator(accept_all)
                    .creator_account_id("admin@test")
                    .tx_counter(1)
                    .created_time(NOW_MS)
                    .create_domain("test", "user");
                for _ in 1..size {
                    builder = builder
                        .transfer_asset("admin@test", "alice@test", "coin#test", "", "1.00")
                        .unwrap();
                }
                builder.build().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_default_validator(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator/default");
    let validator = DefaultValidator::default();

    for size in [1u64, 100, 1_000] {
        let mut builder = TransactionBuilder::with_validator(accept_all)
            .creator_account_id("admin@test")
            .tx_counter(1)
            .created_time(NOW_MS)
            .create_domain("test", "user");
        for _ in 1..size {
            builder = builder.set_account_quorum("admin@test", 2);
        }
        let tx = builder.build().unwrap().into_inner();

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tx, |b, tx| {
            b.iter(|| validator.validate(tx));
        });
    }

    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let unsigned = TransactionBuilder::with_validator(accept_all)
        .creator_account_id("admin@test")
        .tx_counter(1)
        .created_time(NOW_MS)
        .create_domain("test", "user")
        .set_account_detail("admin@test", "motto", "x".repeat(1024))
        .build()
        .unwrap();

    c.bench_function("transaction/hash", |b| {
        b.iter(|| unsigned.hash());
    });
}

criterion_group!(
    benches,
    bench_build_single_command,
    bench_build_many_commands,
    bench_default_validator,
    bench_hash,
);
criterion_main!(benches);
