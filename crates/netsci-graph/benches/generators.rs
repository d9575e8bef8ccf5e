use netsci_core::rng::RngHandle;
use netsci_graph::{generate_kleinberg_grid, generate_random_graph, generate_watts_strogatz_graph};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn generators_bench(c: &mut Criterion) {
    c.bench_function("random_graph_200", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            black_box(generate_random_graph(200, 0.05, &mut rng).unwrap());
        });
    });

    c.bench_function("watts_strogatz_500", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            black_box(generate_watts_strogatz_graph(500, 6, 0.1, &mut rng).unwrap());
        });
    });

    c.bench_function("kleinberg_grid_8", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(42);
            black_box(generate_kleinberg_grid(8, 3.0, &mut rng).unwrap());
        });
    });
}

criterion_group!(benches, generators_bench);
criterion_main!(benches);
