#![forbid(unsafe_code)]
//! commute_city: procedural city layout over a density field, plus a home/office commute cycle.
//!
//! Modules:
//! - field: coherent-noise density fields and the RGBA pixel buffer derived from them
//! - sampling: density-biased rejection sampling of grid points (sites, offices)
//! - graph: Voronoi / Delaunay / minimum spanning tree over the sampled sites
//! - layout: roads, houses and offices placed in terrain space
//! - commute: agent roster, world collaborator interface and the phase scheduler
//! - city: the generation pipeline threading all of the above
//! - events: structured event stream for generation and scheduling
pub mod city;
pub mod commute;
pub mod error;
pub mod events;
pub mod field;
pub mod graph;
pub mod layout;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use commute_city::prelude::*;`.
pub mod prelude {
    pub use crate::city::{City, CityConfig, CityGenerator, CityHost};
    pub use crate::commute::roster::{AgentRecord, AgentRoster};
    pub use crate::commute::scheduler::{CommutePhase, CommuteScheduler, SchedulerConfig};
    pub use crate::commute::world::{
        CommuteWorld, MovingAgent, SimulatedWorld, SpawnRequest, ARRIVAL_DISTANCE,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{CityEvent, CityEventKind, EventSink, FnSink, VecSink};
    pub use crate::field::{DensityField, NoiseParams, PixelBuffer};
    pub use crate::graph::{GraphEdge, PlanarGraph};
    pub use crate::layout::{
        AssetKind, HouseVariant, Layout, LayoutConfig, PlacedAsset, TerrainMapping,
    };
    pub use crate::sampling::{DensityRejectionSampler, Site, SiteSampler};
}
