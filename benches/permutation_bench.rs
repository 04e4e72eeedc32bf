use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::hint::black_box;

use permutest::{Family, PermutationTest, PooledT, Population, Sample, SampleSource, Statistic, WelchT};

fn xrng() -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(thread_rng().next_u64())
}

fn gaussian_pair(n1: usize, n2: usize) -> (Sample<f64>, Sample<f64>) {
    let mut rng = xrng();
    let pop = Population::new(0.0, 1.0, Family::Normal);
    (
        pop.draw(n1, &mut rng).unwrap(),
        pop.draw(n2, &mut rng).unwrap(),
    )
}

/// 1. STATISTIC COMPUTE (scaling test with multiple sizes)
fn bench_statistic_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistic/compute");
    group.throughput(Throughput::Elements(1));

    for &size in &[10, 100, 1_000] {
        let (a, b) = gaussian_pair(size, size);

        group.bench_with_input(BenchmarkId::new("pooled", size), &size, |bench, _| {
            bench.iter(|| black_box(PooledT.compute(black_box(a.as_ref()), black_box(b.as_ref()))))
        });
        group.bench_with_input(BenchmarkId::new("welch", size), &size, |bench, _| {
            bench.iter(|| black_box(WelchT.compute(black_box(a.as_ref()), black_box(b.as_ref()))))
        });
    }
    group.finish();
}

/// 2. FULL PERMUTATION P-VALUE at the study's group sizes
fn bench_p_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation/p_value");
    let (a, b) = gaussian_pair(25, 100);

    for &r in &[99, 999] {
        let test = PermutationTest::new(WelchT, r);
        group.bench_with_input(BenchmarkId::new("welch_25x100", r), &r, |bench, _| {
            bench.iter(|| black_box(test.p_value(black_box(&a), black_box(&b), xrng()).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_statistic_compute, bench_p_value);
criterion_main!(benches);
