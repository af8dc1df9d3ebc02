use std::time::Duration;

use commute_city::prelude::*;
use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SAMPLE_SIZE: usize = 10;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

/// Field side used when a bench needs a city but does not sweep its size.
pub const CITY_SIDE: usize = 400;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Generate a city from `config` with a fixed seed, outside the measured section.
pub fn seeded_city(config: CityConfig, seed: u64) -> City {
    CityGenerator::try_new(config)
        .and_then(|generator| generator.generate(&mut StdRng::seed_from_u64(seed)))
        .expect("bench city should generate")
}
