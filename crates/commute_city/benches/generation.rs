mod common;

use std::hint::black_box;

use commute_city::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZES: [usize; 3] = [200, 400, 800];
const AGENT_COUNTS: [usize; 3] = [10, 100, 1000];

fn field_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/density_field");
    let noise = NoiseParams::default();

    for &size in &SIZES {
        group.throughput(common::elements_throughput(size * size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let field = DensityField::generate(size, size, &noise).expect("field");
                black_box(field.values().len());
            });
        });
    }

    group.finish();
}

fn city_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/city");

    for &size in &SIZES {
        let config = CityConfig::new(size, size);
        let generator = CityGenerator::try_new(config).expect("valid config");
        group.throughput(common::elements_throughput(
            generator.config().building_count,
        ));

        let mut rng = StdRng::seed_from_u64(0xC17Du64 ^ size as u64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let city = generator.generate(&mut rng).expect("city");
                black_box(city.layout.houses.len());
            });
        });
    }

    group.finish();
}

fn commute_cycle_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation/commute_cycle");

    for &agents in &AGENT_COUNTS {
        let config = CityConfig::new(common::CITY_SIDE, common::CITY_SIDE)
            .with_building_count(100)
            .with_agent_count(agents);
        let city = common::seeded_city(config, 0xA6E7u64 ^ agents as u64);
        group.throughput(common::elements_throughput(agents));

        group.bench_with_input(BenchmarkId::from_parameter(agents), &city, |b, city| {
            b.iter(|| {
                let mut scheduler = CommuteScheduler::new(city.roster.clone());
                let mut world = SimulatedWorld::default();
                while scheduler.completed_cycles() < 1 {
                    scheduler.tick(&mut world);
                    world.advance(0.1);
                }
                black_box(world.arrived());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = field_benches, city_benches, commute_cycle_benches
}
criterion_main!(benches);
