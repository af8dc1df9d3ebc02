mod common;

use std::hint::black_box;

use commute_city::graph::{spanning_tree, Bounds};
use commute_city::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const SITE_COUNTS: [usize; 4] = [20, 80, 320, 1280];

fn seeded_sites(count: usize, seed: u64) -> Vec<Site> {
    let config = CityConfig::new(common::CITY_SIDE, common::CITY_SIDE)
        .with_site_count(count)
        .with_building_count(0)
        .with_office_count(0)
        .with_agent_count(0);
    common::seeded_city(config, seed).sites
}

fn planar_graph_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/planar_graph");
    let bounds = Bounds::from_size(common::CITY_SIDE as f32, common::CITY_SIDE as f32);

    for &count in &SITE_COUNTS {
        let sites = seeded_sites(count, 0x5173u64 ^ count as u64);
        group.throughput(common::elements_throughput(sites.len()));
        group.bench_with_input(BenchmarkId::from_parameter(count), &sites, |b, sites| {
            b.iter(|| {
                let graph = PlanarGraph::build(sites, bounds).expect("graph");
                black_box(graph.voronoi.len());
            });
        });
    }

    group.finish();
}

fn kruskal_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/kruskal");
    let bounds = Bounds::from_size(common::CITY_SIDE as f32, common::CITY_SIDE as f32);

    for &count in &SITE_COUNTS {
        let sites = seeded_sites(count, 0x4B5u64 ^ count as u64);
        let graph = PlanarGraph::build(&sites, bounds).expect("graph");
        group.throughput(common::elements_throughput(graph.delaunay.len()));
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &graph.delaunay,
            |b, edges| {
                b.iter(|| black_box(spanning_tree::kruskal(edges).len()));
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = planar_graph_benches, kruskal_benches
}
criterion_main!(benches);
