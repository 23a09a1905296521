use criterion::{criterion_group, criterion_main, Criterion};
use prims_maze::{generate, MazeConfig, MazeGrowth};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_prims_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("prims_maze_32", move |b| {
        b.iter(|| generate(32.0, 32.0, 1.0, &mut rng).unwrap())
    });
}

fn bench_prims_maze_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    c.bench_function("prims_maze_128", move |b| {
        b.iter(|| generate(128.0, 128.0, 1.0, &mut rng).unwrap())
    });
}

fn bench_prims_maze_stepped_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    let config = MazeConfig::new(32.0, 32.0, 1.0);
    c.bench_function("prims_maze_stepped_32", move |b| {
        b.iter(|| {
            let mut growth = MazeGrowth::initialize(&config, &mut rng).unwrap();
            while growth.step() {}
            growth
        })
    });
}

fn bench_solution_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    let maze = generate(128.0, 128.0, 1.0, &mut rng).unwrap();
    c.bench_function("solution_128", move |b| {
        b.iter(|| maze.solution())
    });
}

criterion_group!(
    benches,
    bench_prims_maze_32,
    bench_prims_maze_128,
    bench_prims_maze_stepped_32,
    bench_solution_128
);
criterion_main!(benches);
