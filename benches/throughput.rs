//! Throughput benchmarks for bulk order signing.
//!
//! Run with: `cargo bench --bench throughput`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use rust_decimal::Decimal;

use auth::PrivateKey;
use clob_core::{CreateOrderOptions, OrderBuilder, Side, SignatureType, TickSize, UserOrder};

const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Generate a batch of random on-tick orders.
fn generate_order_batch(rng: &mut impl Rng, count: usize) -> Vec<UserOrder> {
    (0..count)
        .map(|i| {
            let price = Decimal::new(rng.gen_range(1..100), 2);
            let size = Decimal::new(rng.gen_range(100..100_000), 2);
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            UserOrder::new(format!("{}", 1_000_000 + i), price, size, side)
        })
        .collect()
}

/// Benchmark sequential order building.
fn bench_sequential_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_build");
    let mut rng = rand::thread_rng();
    let key = PrivateKey::from_hex(TEST_KEY).expect("valid test key");
    let builder = OrderBuilder::new(137, SignatureType::Eoa, None);
    let options = CreateOrderOptions::new(TickSize::Hundredth);

    for count in [10, 100].iter() {
        let orders = generate_order_batch(&mut rng, *count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("build", count), &orders, |b, orders| {
            b.iter(|| {
                let signed: Vec<_> = orders
                    .iter()
                    .map(|order| builder.build_order(&key, order, &options))
                    .collect();
                black_box(signed)
            })
        });
    }

    group.finish();
}

/// Benchmark parallel order building using rayon.
fn bench_parallel_build(c: &mut Criterion) {
    use rayon::prelude::*;

    let mut group = c.benchmark_group("parallel_build");
    let mut rng = rand::thread_rng();
    let key = PrivateKey::from_hex(TEST_KEY).expect("valid test key");
    let builder = OrderBuilder::new(137, SignatureType::Eoa, None);
    let options = CreateOrderOptions::new(TickSize::Hundredth);

    for count in [100, 1000].iter() {
        let orders = generate_order_batch(&mut rng, *count);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("build", count), &orders, |b, orders| {
            b.iter(|| {
                let signed: Vec<_> = orders
                    .par_iter()
                    .map(|order| builder.build_order(&key, order, &options))
                    .collect();
                black_box(signed)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sequential_build, bench_parallel_build);

criterion_main!(benches);
