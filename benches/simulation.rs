//! Performance benchmarks for vulpine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vulpine::{Settings, World};

fn benchmark_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for population in [100, 500, 1000].iter() {
        let mut settings = Settings::default();
        settings.world.rows = 80;
        settings.world.cols = 80;
        settings.seeding.rocks = 100;
        settings.seeding.rabbits = *population;
        settings.seeding.foxes = population / 5;

        let mut world = World::random_with_seed(&settings, 42);

        // Warm up
        world.run(10);

        group.bench_with_input(
            BenchmarkId::new("rabbits", population),
            population,
            |b, _| {
                b.iter(|| {
                    world.step();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_planning(c: &mut Criterion) {
    let mut settings = Settings::default();
    settings.world.rows = 80;
    settings.world.cols = 80;
    settings.seeding.rabbits = 1000;
    settings.seeding.foxes = 200;
    settings.seeding.rocks = 100;

    let world = World::random_with_seed(&settings, 42);

    c.bench_function("plan_rabbit_moves", |b| {
        b.iter(|| {
            vulpine::planner::plan_moves(
                black_box(&world.grid),
                black_box(&world.rabbits),
                black_box(3),
            )
        })
    });
}

criterion_group!(benches, benchmark_world_step, benchmark_planning);
criterion_main!(benches);
