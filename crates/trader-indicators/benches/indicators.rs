//! Benchmarks for indicator implementations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trader_core::{Candle, CandleSeries, Indicator, Timeframe};
use trader_indicators::{Ema, IndicatorEngine, Rsi, Sma, SuperTrend};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> CandleSeries {
    let mut series = CandleSeries::new("EURUSD", Timeframe::Minute5);
    for (i, close) in generate_test_data(size).into_iter().enumerate() {
        series.push(Candle::new(
            i as i64 * 300_000,
            close - 0.1,
            close + 0.2,
            close - 0.2,
            close,
            1_000.0,
        ));
    }
    series
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("standard", size), &data, |b, data| {
            let sma = Sma::new(20);
            b.iter(|| sma.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_ema(c: &mut Criterion) {
    let mut group = c.benchmark_group("EMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("standard", size), &data, |b, data| {
            let ema = Ema::new(21);
            b.iter(|| ema.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("standard", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_supertrend(c: &mut Criterion) {
    let mut group = c.benchmark_group("SuperTrend");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);
        let highs: Vec<f64> = data.iter().map(|v| v + 0.2).collect();
        let lows: Vec<f64> = data.iter().map(|v| v - 0.2).collect();

        group.bench_with_input(
            BenchmarkId::new("standard", size),
            &(highs, lows, data),
            |b, (highs, lows, closes)| {
                let st = SuperTrend::new(10, 3.0);
                b.iter(|| st.calculate_ohlc(black_box(highs), black_box(lows), black_box(closes)))
            },
        );
    }

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("Snapshot");

    for size in [100, 500].iter() {
        let series = generate_series(*size);

        group.bench_with_input(BenchmarkId::new("full", size), &series, |b, series| {
            let engine = IndicatorEngine::default();
            b.iter(|| engine.compute(black_box(series)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sma,
    benchmark_ema,
    benchmark_rsi,
    benchmark_supertrend,
    benchmark_snapshot
);
criterion_main!(benches);
