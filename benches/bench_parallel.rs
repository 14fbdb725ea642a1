use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ascii_evolve::{
    evolution::{BrightnessChallenge, EvolutionLauncher, EvolutionOptions, LogLevel},
    grid::{Shape, TargetGrid},
    palette::{BrightnessMap, Palette},
    strategy::GenerationalStrategy,
};

fn launcher() -> EvolutionLauncher<GenerationalStrategy, BrightnessChallenge> {
    let palette = Palette::parse(".:-=+*#%@").unwrap();
    let shape = Shape::new(16, 24).unwrap();
    let values = (0..shape.area())
        .map(|i| ((i / shape.width()) + (i % shape.width())) as f64 / 38.0)
        .collect();
    let target = TargetGrid::new(shape, values).unwrap();
    let challenge = BrightnessChallenge::new(target, BrightnessMap::new(&palette));
    let strategy = GenerationalStrategy::new(0.8, 0.05, 3).unwrap();
    EvolutionLauncher::new(strategy, challenge, palette)
}

fn options(population_size: usize, parallel_threshold: usize) -> EvolutionOptions {
    EvolutionOptions::builder()
        .population_size(population_size)
        .num_generations(10)
        .log_level(LogLevel::None)
        .parallel_threshold(parallel_threshold)
        .seed(7)
        .build()
}

fn bench_generations(c: &mut Criterion) {
    let launcher = launcher();

    let mut group = c.benchmark_group("generations");
    group.sample_size(10);
    for size in [100, 1000, 5000] {
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| launcher.evolve(black_box(options(size, usize::MAX))).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, &size| {
            b.iter(|| launcher.evolve(black_box(options(size, 1))).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generations);
criterion_main!(benches);
