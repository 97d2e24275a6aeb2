use criterion::{criterion_group, criterion_main, Criterion};
use model::test_utilities::{init_test_data, single_transport_network};
use solver::{solve, SolveOptions, Strategy};

pub fn greedy_benchmarks(c: &mut Criterion) {
    let d = init_test_data();
    let options = SolveOptions::default();
    c.bench_function("greedy_multi_hop", |b| {
        b.iter(|| solve(d.network.clone(), Strategy::Greedy, &options).unwrap())
    });

    c.bench_function("greedy_candidate_paths_multi_hop", |b| {
        b.iter(|| solve(d.network.clone(), Strategy::GreedyCandidatePaths, &options).unwrap())
    });

    let network = single_transport_network(50, 10, 200);
    c.bench_function("greedy_single_transport", |b| {
        b.iter(|| solve(network.clone(), Strategy::Greedy, &options).unwrap())
    });
}

criterion_group!(benches, greedy_benchmarks);
criterion_main!(benches);
