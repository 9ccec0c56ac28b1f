use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mines_core::*;
use std::hint::black_box;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::beginner()),
    ("intermediate", GameConfig::intermediate()),
    ("expert", GameConfig::expert()),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        let start = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut generator = RandomMinefieldGenerator::new(0xdead_beef, StartTile::SimpleSafe);
            b.iter(|| generator.generate(black_box(config), start))
        });
    }
    group.finish();
}

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    let sparse = GameConfig::new((100, 50), 10).expect("valid config");
    for (name, config) in TIERS.into_iter().chain([("sparse", sparse)]) {
        let start = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut board =
                Board::with_generator(config, RandomMinefieldGenerator::new(7, StartTile::AlwaysZero));
            b.iter(|| {
                board.restart();
                board.reveal(black_box(start))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_first_reveal);
criterion_main!(benches);
