use criterion::{criterion_group, criterion_main, Criterion};
use model::test_utilities::init_test_data;
use solution::{Encoding, Route};

pub fn encoding_modification_benchmarks(c: &mut Criterion) {
    let d = init_test_data();
    let route = Route::from_trucks(
        [d.plant_terminal_cheap, d.terminal_dealer1_early],
        &d.network,
    );
    let empty = Encoding::empty(d.network.clone());
    c.bench_function("assign", |b| {
        b.iter(|| {
            let mut encoding = empty.clone();
            encoding.assign(d.veh0, route.clone()).unwrap();
        })
    });

    let mut assigned = empty.clone();
    assigned.assign(d.veh0, route.clone()).unwrap();
    c.bench_function("unassign", |b| {
        b.iter(|| {
            let mut encoding = assigned.clone();
            encoding.unassign(d.veh0).unwrap();
        })
    });

    c.bench_function("check_consistency", |b| {
        b.iter(|| {
            assigned.check_consistency().unwrap();
        })
    });
}

criterion_group!(benches, encoding_modification_benchmarks);
criterion_main!(benches);
