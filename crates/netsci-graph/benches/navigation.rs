use netsci_core::rng::RngHandle;
use netsci_graph::{generate_kleinberg_grid, greedy_navigate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn navigation_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(11);
    let lattice = generate_kleinberg_grid(8, 3.0, &mut rng).unwrap();
    let (start, target) = lattice.corners();

    c.bench_function("greedy_navigate_8", |b| {
        b.iter(|| black_box(greedy_navigate(&lattice, start, target).unwrap()));
    });
}

criterion_group!(benches, navigation_bench);
criterion_main!(benches);
