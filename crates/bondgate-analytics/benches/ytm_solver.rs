//! Benchmarks for the yield solver and the screening pipeline.
//!
//! Run with: cargo bench -p bondgate-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bondgate_analytics::pipelines::screener::{self, ScreenerInputs};
use bondgate_analytics::prelude::*;
use bondgate_core::{CreditRating, ScreeningPolicy};

fn bench_solve_ytm(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_ytm");

    for years in [1.0, 5.0, 10.0, 30.0] {
        // 5% coupon priced at a 6% yield so the solver starts away from the root.
        let price = bond_price(100.0, 0.05, 0.06, years);
        group.bench_with_input(BenchmarkId::new("discount", years), &price, |b, &price| {
            b.iter(|| solve_ytm(black_box(price), 100.0, 0.05, black_box(years)));
        });
    }

    group.bench_function("fractional_maturity", |b| {
        b.iter(|| solve_ytm(black_box(97.3), 100.0, 0.045, black_box(7.4)));
    });

    group.finish();
}

fn bench_fair_price(c: &mut Criterion) {
    let mut group = c.benchmark_group("fair_price");

    for frequency in [1_u32, 2, 12] {
        group.bench_with_input(
            BenchmarkId::new("10y", frequency),
            &frequency,
            |b, &frequency| {
                b.iter(|| fair_price(100.0, 0.05, black_box(0.055), 10.0, frequency));
            },
        );
    }

    group.finish();
}

fn bench_screener(c: &mut Criterion) {
    let policy = ScreeningPolicy::default();
    let inputs = ScreenerInputs {
        face_value: 100.0,
        market_price: 95.0,
        coupon_rate: 0.05,
        years_to_maturity: 10.0,
        inflation: 0.03,
        risk_free_rate: 0.04,
        currency_depreciation: 0.0,
        home_inflation: 0.03,
        holding_period: 10.0,
        is_callable: false,
        trading_volume: 5.0,
        rating: CreditRating::BBB,
    };

    c.bench_function("screener_evaluate", |b| {
        b.iter(|| screener::evaluate(black_box(&inputs), &policy));
    });
}

criterion_group!(benches, bench_solve_ytm, bench_fair_price, bench_screener);
criterion_main!(benches);
