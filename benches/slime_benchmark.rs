/*
 * Slime Mold Simulation Benchmark
 *
 * Measures the spatial grid rebuild and query on its own, and the full tick
 * including sensing, steering and trail bookkeeping.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use slime_mold::{HeadlessGateway, SimulationParams, SlimeMoldSimulation, SpatialGrid, Vector2};

const WORLD_SIZE: f64 = 720.0;

fn random_positions(n: usize) -> Vec<Vector2> {
    let mut rng = StdRng::seed_from_u64(17);
    (0..n)
        .map(|_| Vector2::new(rng.gen_range(0.0..WORLD_SIZE), rng.gen_range(0.0..WORLD_SIZE)))
        .collect()
}

// Rebuild the grid and query every agent's neighbourhood
fn bench_spatial_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("spatial_grid");

    for num_agents in [100, 300, 1000, 3000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
            let positions = random_positions(n);
            let mut grid = SpatialGrid::new(70.0).expect("valid cell size");

            b.iter(|| {
                for (i, &p) in positions.iter().enumerate() {
                    grid.insert(i, p);
                }
                let mut found = 0;
                for &p in &positions {
                    found += grid.neighbors_of(p).len();
                }
                grid.clear();
                black_box(found)
            });
        });
    }

    group.finish();
}

// Full ticks through the headless gateway, circles included
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");

    for num_agents in [100, 300, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
            let params = SimulationParams { num_agents: n, seed: Some(3), ..Default::default() };
            let mut simulation =
                SlimeMoldSimulation::new(HeadlessGateway::new(), params).expect("valid params");
            simulation.start().expect("headless start");
            // Let the trails fill up so circle generation is at full size
            simulation.run_for(Some(100));

            b.iter(|| black_box(simulation.try_running_one_timestep()));
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_spatial_grid, bench_update_loop
}

criterion_main!(benches);
