//! Criterion benchmarks for u-qap.
//!
//! Uses synthetic grouped instances on a ring-with-chords graph, the shape
//! produced by the problem file format.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_numflow::random::create_rng;
use u_qap::ils::{IlsConfig, IlsRunner};
use u_qap::model::{CostEvaluator, GroupLayout, ProblemModel};
use u_qap::tabu::{NeighborhoodSampler, RandomSwapSampler, TabuConfig, TabuRunner};

// ===========================================================================
// Synthetic instance: 8 groups, ring plus random chords
// ===========================================================================

fn synthetic(dimension: usize, seed: u64) -> ProblemModel {
    let groups = 8;
    let mut rng = create_rng(seed);

    let mut energies = vec![vec![0i64; groups]; groups];
    for a in 0..groups {
        for b in a..groups {
            let e = rng.random_range(0..50);
            energies[a][b] = e;
            energies[b][a] = e;
        }
    }

    let mut sizes = vec![dimension / groups; groups];
    sizes[groups - 1] += dimension % groups;
    let layout = GroupLayout::from_sizes(&sizes);
    let flow: Vec<Vec<i64>> = (0..dimension)
        .map(|i| {
            (0..dimension)
                .map(|j| energies[layout.group_of(i)][layout.group_of(j)])
                .collect()
        })
        .collect();

    let mut edges: Vec<(usize, usize)> = (0..dimension).map(|i| (i, (i + 1) % dimension)).collect();
    for _ in 0..dimension {
        let a = rng.random_range(0..dimension);
        let b = rng.random_range(0..dimension);
        if a != b {
            edges.push((a, b));
        }
    }

    ProblemModel::from_edges(flow, &edges)
        .and_then(|model| model.with_groups(layout))
        .expect("synthetic instance is valid")
}

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost");

    for &dim in &[100, 500, 1000] {
        let model = synthetic(dim, 42);
        let solution: Vec<usize> = (0..dim).rev().collect();
        group.bench_with_input(BenchmarkId::new("full", dim), &model, |b, m| {
            let eval = CostEvaluator::new(m);
            b.iter(|| black_box(eval.full_cost(black_box(&solution))))
        });
        group.bench_with_input(BenchmarkId::new("move", dim), &model, |b, m| {
            let eval = CostEvaluator::new(m);
            b.iter(|| black_box(eval.move_cost(black_box(&solution), 3, dim / 2)))
        });
    }
    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighborhood");
    group.sample_size(20);

    for &size in &[1_000, 10_000] {
        let model = synthetic(500, 7);
        let eval = CostEvaluator::new(&model);
        let solution: Vec<usize> = (0..500).collect();
        let cost = eval.full_cost(&solution);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &n| {
            let mut rng = create_rng(1);
            let mut sampler = RandomSwapSampler::default();
            b.iter(|| black_box(sampler.sample(&eval, &solution, cost, n, &mut rng)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tabu_search");
    group.sample_size(10);

    for &dim in &[100, 500] {
        let model = synthetic(dim, 3);
        let config = TabuConfig::default()
            .with_neighborhood_size(1_000)
            .with_max_fails(100)
            .with_max_iterations(200)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(model, config), |b, (m, c)| {
            b.iter(|| {
                let result = TabuRunner::run(black_box(m), black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_ils(c: &mut Criterion) {
    let mut group = c.benchmark_group("ils");
    group.sample_size(10);

    for &dim in &[100, 500] {
        let model = synthetic(dim, 5);
        let config = IlsConfig::default()
            .with_local_search_moves(2_000)
            .with_max_generations(20)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &(model, config), |b, (m, c)| {
            b.iter(|| black_box(IlsRunner::run(black_box(m), black_box(c))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cost, bench_sampling, bench_search, bench_ils);
criterion_main!(benches);
