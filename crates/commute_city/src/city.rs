//! The generation pipeline: density field, sites, planar graph, layout, host hand-off, roster.
use std::ops::Range;

use glam::Vec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::commute::roster::AgentRoster;
use crate::error::{Error, Result};
use crate::events::{CityEvent, CityEventKind, EventSink};
use crate::field::{DensityField, NoiseParams, PixelBuffer};
use crate::graph::{Bounds, PlanarGraph};
use crate::layout::{Layout, LayoutConfig, TerrainMapping, HOUSE_T_RANGE, OFFICE_THRESHOLD};
use crate::sampling::sites::SITE_THRESHOLD;
use crate::sampling::{DensityRejectionSampler, Site, SiteSampler, DEFAULT_MAX_TRIALS};

/// Host collaborators invoked once layout generation is complete.
pub trait CityHost {
    /// Receives the grayscale height map of the density field.
    fn apply_terrain_texture(&mut self, pixels: &PixelBuffer);

    /// Signals that the layout is final and walkable surfaces can be computed.
    fn bake_navigation(&mut self);
}

/// A host that ignores both calls.
impl CityHost for () {
    fn apply_terrain_texture(&mut self, _pixels: &PixelBuffer) {}

    fn bake_navigation(&mut self) {}
}

/// Configuration for generating a city.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct CityConfig {
    /// Density field width in grid cells.
    pub width: usize,
    /// Density field height in grid cells.
    pub height: usize,
    pub noise: NoiseParams,
    /// Number of graph sites (NPOINTS).
    pub site_count: usize,
    /// Number of houses (NBUILDINGS).
    pub building_count: usize,
    /// Number of offices (NOFFICES).
    pub office_count: usize,
    /// Number of commuting agents (NAGENTS).
    pub agent_count: usize,
    /// Grid units per terrain unit.
    pub scaling_factor: f32,
    /// Trial budget of each rejection-sampling loop.
    pub max_sampling_trials: usize,
    /// Range the per-trial site acceptance threshold is drawn from.
    pub site_threshold: Range<f32>,
    /// Range the per-trial office acceptance threshold is drawn from.
    pub office_threshold: Range<f32>,
    /// Fraction range along a road where houses are placed.
    pub house_t: Range<f32>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            noise: NoiseParams::default(),
            site_count: 80,
            building_count: 800,
            office_count: 3,
            agent_count: 10,
            scaling_factor: 20.0,
            max_sampling_trials: DEFAULT_MAX_TRIALS,
            site_threshold: SITE_THRESHOLD,
            office_threshold: OFFICE_THRESHOLD,
            house_t: HOUSE_T_RANGE,
        }
    }
}

impl CityConfig {
    /// Creates a new [`CityConfig`] over a `width x height` field with default counts.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_noise(mut self, noise: NoiseParams) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_noise_frequency(mut self, frequency: Vec2) -> Self {
        self.noise.frequency = frequency;
        self
    }

    pub fn with_site_count(mut self, site_count: usize) -> Self {
        self.site_count = site_count;
        self
    }

    pub fn with_building_count(mut self, building_count: usize) -> Self {
        self.building_count = building_count;
        self
    }

    pub fn with_office_count(mut self, office_count: usize) -> Self {
        self.office_count = office_count;
        self
    }

    pub fn with_agent_count(mut self, agent_count: usize) -> Self {
        self.agent_count = agent_count;
        self
    }

    pub fn with_scaling_factor(mut self, scaling_factor: f32) -> Self {
        self.scaling_factor = scaling_factor;
        self
    }

    pub fn with_max_sampling_trials(mut self, max_sampling_trials: usize) -> Self {
        self.max_sampling_trials = max_sampling_trials;
        self
    }

    pub fn with_site_threshold(mut self, threshold: Range<f32>) -> Self {
        self.site_threshold = threshold;
        self
    }

    pub fn with_office_threshold(mut self, threshold: Range<f32>) -> Self {
        self.office_threshold = threshold;
        self
    }

    pub fn with_house_t(mut self, house_t: Range<f32>) -> Self {
        self.house_t = house_t;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width < 4 || self.height < 4 {
            return Err(Error::InvalidConfig(
                "width and height must be >= 4 to leave a sampling interior".into(),
            ));
        }
        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(Error::InvalidConfig("scaling_factor must be > 0".into()));
        }
        if self.max_sampling_trials == 0 {
            return Err(Error::InvalidConfig(
                "max_sampling_trials must be > 0".into(),
            ));
        }
        self.noise.validate(self.width, self.height)?;
        self.site_sampler().sampler.validate(self.width, self.height)?;
        self.layout().office_sampler.validate(self.width, self.height)?;
        let t = &self.house_t;
        if !(t.start.is_finite() && t.end.is_finite())
            || t.start < 0.0
            || t.end > 1.0
            || t.start > t.end
        {
            return Err(Error::InvalidConfig(format!(
                "house_t {t:?} must be an ascending range within [0, 1]"
            )));
        }
        Ok(())
    }

    /// Site sampler derived from this configuration.
    pub fn site_sampler(&self) -> SiteSampler {
        SiteSampler::new(
            DensityRejectionSampler::new(self.site_threshold.clone())
                .with_max_trials(self.max_sampling_trials),
        )
    }

    /// Layout settings derived from this configuration.
    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig {
            building_count: self.building_count,
            office_count: self.office_count,
            house_t: self.house_t.clone(),
            office_sampler: DensityRejectionSampler::new(self.office_threshold.clone())
                .with_max_trials(self.max_sampling_trials),
        }
    }

    pub fn terrain_mapping(&self) -> TerrainMapping {
        TerrainMapping::new(self.width, self.height, self.scaling_factor)
    }
}

/// One generated city. Never mutated after generation.
#[derive(Clone, Debug)]
pub struct City {
    pub field: DensityField,
    pub sites: Vec<Site>,
    pub graph: PlanarGraph,
    pub layout: Layout,
    pub roster: AgentRoster,
    pub mapping: TerrainMapping,
}

/// Runs the full generation pipeline for a validated [`CityConfig`].
#[derive(Clone, Debug)]
pub struct CityGenerator {
    config: CityConfig,
}

impl CityGenerator {
    pub fn try_new(config: CityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Generate a city without a host or event sink.
    pub fn generate(&self, rng: &mut dyn RngCore) -> Result<City> {
        self.generate_with(rng, &mut (), &mut ())
    }

    /// Generate a city, handing the height map and the bake signal to `host` once the layout is
    /// final and reporting each stage to `sink`. Stops at the first failing stage.
    pub fn generate_with(
        &self,
        rng: &mut dyn RngCore,
        host: &mut dyn CityHost,
        sink: &mut dyn EventSink,
    ) -> Result<City> {
        let config = &self.config;
        if sink.wants(CityEventKind::GenerationStarted) {
            sink.send(CityEvent::GenerationStarted {
                config: config.clone(),
            });
        }

        let field = DensityField::generate(config.width, config.height, &config.noise)?;
        if sink.wants(CityEventKind::FieldGenerated) {
            sink.send(CityEvent::FieldGenerated {
                width: field.width(),
                height: field.height(),
            });
        }

        let sites = config.site_sampler().sample(&field, config.site_count, rng)?;
        if sink.wants(CityEventKind::SitesSampled) {
            sink.send(CityEvent::SitesSampled { count: sites.len() });
        }

        let bounds = Bounds::from_size(config.width as f32, config.height as f32);
        let graph = PlanarGraph::build(&sites, bounds)?;
        if sink.wants(CityEventKind::GraphBuilt) {
            sink.send(CityEvent::GraphBuilt {
                voronoi_edges: graph.voronoi.len(),
                delaunay_edges: graph.delaunay.len(),
                spanning_tree_edges: graph.spanning_tree.len(),
            });
        }

        let mapping = config.terrain_mapping();
        let layout = Layout::place(&graph, &field, &mapping, &config.layout(), rng)?;
        if sink.wants(CityEventKind::LayoutPlaced) {
            sink.send(CityEvent::LayoutPlaced {
                roads: layout.roads.len(),
                houses: layout.houses.len(),
                offices: layout.offices.len(),
            });
        }

        host.apply_terrain_texture(&PixelBuffer::from_field(&field));
        host.bake_navigation();
        if sink.wants(CityEventKind::NavigationBaked) {
            sink.send(CityEvent::NavigationBaked);
        }

        let roster = if config.agent_count == 0 {
            AgentRoster::default()
        } else {
            AgentRoster::from_layout(&layout, config.agent_count, rng)?
        };
        if sink.wants(CityEventKind::RosterAssigned) {
            sink.send(CityEvent::RosterAssigned {
                agents: roster.len(),
            });
        }

        info!(
            "Generated city {}x{}: {} sites | {} roads | {} houses | {} offices | {} agents.",
            config.width,
            config.height,
            sites.len(),
            layout.roads.len(),
            layout.houses.len(),
            layout.offices.len(),
            roster.len()
        );
        if sink.wants(CityEventKind::GenerationFinished) {
            sink.send(CityEvent::GenerationFinished);
        }

        Ok(City {
            field,
            sites,
            graph,
            layout,
            roster,
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::commute::scheduler::{CommutePhase, CommuteScheduler};
    use crate::commute::world::SimulatedWorld;
    use crate::events::VecSink;

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<&'static str>,
        texture_size: Option<(usize, usize)>,
    }

    impl CityHost for RecordingHost {
        fn apply_terrain_texture(&mut self, pixels: &PixelBuffer) {
            self.calls.push("texture");
            self.texture_size = Some((pixels.width, pixels.height));
        }

        fn bake_navigation(&mut self) {
            self.calls.push("bake");
        }
    }

    fn small_config() -> CityConfig {
        CityConfig::new(120, 100)
            .with_site_count(4)
            .with_building_count(2)
            .with_office_count(1)
            .with_agent_count(3)
    }

    #[test]
    fn small_city_has_expected_counts() {
        let generator = CityGenerator::try_new(small_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let city = generator.generate(&mut rng).unwrap();

        assert_eq!(city.sites.len(), 4);
        assert_eq!(city.layout.houses.len(), 2);
        assert_eq!(city.layout.offices.len(), 1);
        assert!(!city.layout.roads.is_empty());
        assert_eq!(city.layout.roads.len(), city.graph.voronoi.len());
        assert_eq!(city.roster.len(), 3);
        for record in city.roster.records() {
            assert_eq!(record.office, city.layout.offices[0].position);
        }
    }

    #[test]
    fn same_seed_same_city() {
        let generator = CityGenerator::try_new(small_config().with_building_count(20)).unwrap();
        let a = generator.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.sites, b.sites);
        assert_eq!(a.layout, b.layout);
        assert_eq!(a.roster, b.roster);
    }

    #[test]
    fn host_is_called_once_in_order() {
        let generator = CityGenerator::try_new(small_config()).unwrap();
        let mut host = RecordingHost::default();
        let mut sink = VecSink::new();
        generator
            .generate_with(&mut StdRng::seed_from_u64(3), &mut host, &mut sink)
            .unwrap();

        assert_eq!(host.calls, vec!["texture", "bake"]);
        assert_eq!(host.texture_size, Some((120, 100)));
        assert_eq!(
            sink.kinds(),
            vec![
                CityEventKind::GenerationStarted,
                CityEventKind::FieldGenerated,
                CityEventKind::SitesSampled,
                CityEventKind::GraphBuilt,
                CityEventKind::LayoutPlaced,
                CityEventKind::NavigationBaked,
                CityEventKind::RosterAssigned,
                CityEventKind::GenerationFinished,
            ]
        );
    }

    #[test]
    fn zero_buildings_means_no_houses() {
        let config = small_config().with_building_count(0).with_agent_count(0);
        let generator = CityGenerator::try_new(config).unwrap();
        let city = generator.generate(&mut StdRng::seed_from_u64(4)).unwrap();
        assert!(city.layout.houses.is_empty());
        assert!(city.roster.is_empty());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(CityGenerator::try_new(CityConfig::new(2, 100)).is_err());
        assert!(CityGenerator::try_new(small_config().with_scaling_factor(0.0)).is_err());
        assert!(CityGenerator::try_new(small_config().with_max_sampling_trials(0)).is_err());
        assert!(matches!(
            CityGenerator::try_new(CityConfig::new(100, 3)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_finite_noise_is_rejected_before_generation() {
        let config = small_config().with_noise_frequency(Vec2::new(f32::NAN, 0.1));
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(CityGenerator::try_new(config).is_err());

        let huge = small_config().with_noise_frequency(Vec2::new(f32::MAX, 0.02));
        assert!(CityGenerator::try_new(huge).is_err());
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(matches!(
            CityGenerator::try_new(small_config().with_site_threshold(0.8..0.4)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(CityGenerator::try_new(small_config().with_office_threshold(0.5..0.1)).is_err());
        assert!(CityGenerator::try_new(small_config().with_house_t(0.8..0.2)).is_err());
        assert!(CityGenerator::try_new(small_config().with_house_t(0.5..1.5)).is_err());
    }

    #[test]
    fn custom_thresholds_reach_the_samplers() {
        // A zero threshold accepts every trial, so one trial per site and office suffices.
        let config = small_config()
            .with_site_threshold(0.0..0.0)
            .with_office_threshold(0.0..0.0)
            .with_max_sampling_trials(4);
        let city = CityGenerator::try_new(config)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(12))
            .unwrap();
        assert_eq!(city.sites.len(), 4);
        assert_eq!(city.layout.offices.len(), 1);

        // No noise cell reaches a mean of 1.0 in any realistic field.
        let config = small_config().with_office_threshold(1.0..1.0);
        let err = CityGenerator::try_new(config.with_max_sampling_trials(1_000))
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(12))
            .unwrap_err();
        assert!(matches!(err, Error::SamplingExhausted { what: "offices", .. }));
    }

    #[test]
    fn custom_house_range_is_used() {
        let config = small_config().with_building_count(30).with_house_t(0.5..0.5);
        let city = CityGenerator::try_new(config)
            .unwrap()
            .generate(&mut StdRng::seed_from_u64(13))
            .unwrap();
        for house in &city.layout.houses {
            let grid = city.mapping.to_grid(house.position);
            let at_midpoint = city
                .graph
                .voronoi
                .iter()
                .any(|e| e.lerp(0.5).distance(grid) < 1e-2);
            assert!(at_midpoint, "{} is not at a road midpoint", house.name);
        }
    }

    #[test]
    fn agents_without_offices_fail_after_layout() {
        let generator = CityGenerator::try_new(small_config().with_office_count(0)).unwrap();
        let mut host = RecordingHost::default();
        let err = generator
            .generate_with(&mut StdRng::seed_from_u64(8), &mut host, &mut ())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCollection { what: "offices" }));
        assert_eq!(host.calls, vec!["texture", "bake"]);
    }

    #[test]
    fn unreachable_density_halts_generation() {
        // Ten trials can never yield 500 accepted sites.
        let config = small_config()
            .with_site_count(500)
            .with_max_sampling_trials(10);
        let generator = CityGenerator::try_new(config).unwrap();
        let mut host = RecordingHost::default();
        let err = generator
            .generate_with(&mut StdRng::seed_from_u64(5), &mut host, &mut ())
            .unwrap_err();
        assert!(matches!(err, Error::SamplingExhausted { what: "sites", .. }));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn generated_city_drives_commute_cycles() {
        let generator = CityGenerator::try_new(small_config().with_building_count(10)).unwrap();
        let city = generator.generate(&mut StdRng::seed_from_u64(6)).unwrap();
        let mut scheduler = CommuteScheduler::new(city.roster.clone());
        let mut world = SimulatedWorld::new(4.0);

        let mut ticks = 0;
        while scheduler.completed_cycles() < 1 && ticks < 10_000 {
            scheduler.tick(&mut world);
            world.advance(0.25);
            ticks += 1;
        }
        assert_eq!(scheduler.completed_cycles(), 1);
        assert_eq!(scheduler.phase(), CommutePhase::DispatchToWork);
        assert_eq!(scheduler.waves_dispatched(), 2);
    }
}
