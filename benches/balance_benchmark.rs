use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp, Normal};
use stddiff::prelude::*;

/// Two equal groups with a normal, an exponential and a five-level column
fn generate_table(size: usize, seed: u64) -> Table {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(1.0, 0.7).unwrap();
    let exp = Exp::new(3.0).unwrap();

    let group: Vec<u8> = (0..size).map(|i| u8::from(i >= size / 2)).collect();
    let gaussian: Vec<f64> = (0..size).map(|_| normal.sample(&mut rng)).collect();
    let skewed: Vec<f64> = (0..size).map(|_| exp.sample(&mut rng)).collect();
    let levels: Vec<i64> = (0..size).map(|_| rng.gen_range(0..5)).collect();
    let weights: Vec<f64> = (0..size).map(|_| rng.gen_range(50.0..150.0)).collect();

    Table::new()
        .with_column("group", ColumnData::numeric(group))
        .unwrap()
        .with_column("gaussian", ColumnData::numeric(gaussian))
        .unwrap()
        .with_column("skewed", ColumnData::numeric(skewed))
        .unwrap()
        .with_column("category", ColumnData::numeric(levels))
        .unwrap()
        .with_column("wgt", ColumnData::numeric(weights))
        .unwrap()
}

fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Estimators");
    let settings = EstimationSettings::default();

    for &size in &[200, 2_000, 20_000] {
        let data = generate_table(size, 42);

        group.bench_with_input(BenchmarkId::new("continuous", size), &data, |b, data| {
            b.iter(|| ContinuousEffect::new().estimate(black_box(data), "group", "gaussian", &settings))
        });
        group.bench_with_input(BenchmarkId::new("skewed", size), &data, |b, data| {
            b.iter(|| ContinuousEffect::skewed().estimate(black_box(data), "group", "skewed", &settings))
        });
        group.bench_with_input(BenchmarkId::new("categorical", size), &data, |b, data| {
            b.iter(|| CategoricalEffect::new().estimate(black_box(data), "group", "category", &settings))
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("BalanceReport");
    let report = BalanceReport::new("group")
        .continuous(["gaussian", "skewed"])
        .categorical(["category"])
        .skewed(["skewed"])
        .weights("wgt")
        .intervals(0.95)
        .unwrap();

    for &size in &[200, 2_000, 20_000] {
        let data = generate_table(size, 7);
        group.bench_with_input(BenchmarkId::new("weighted_with_intervals", size), &data, |b, data| {
            b.iter(|| report.compute(black_box(data)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimators, bench_report);
criterion_main!(benches);
