//! Placement of roads, houses and offices in terrain space.
//!
//! All three routines hang off the Voronoi skeleton or the density field and append
//! [`PlacedAsset`]s with sequential names. Grid coordinates map to terrain coordinates through
//! [`TerrainMapping`], which swaps the axes: grid Y becomes terrain X, grid X becomes terrain Z.
use std::ops::Range;

use glam::{Quat, Vec3};
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::field::DensityField;
use crate::graph::PlanarGraph;
use crate::sampling::DensityRejectionSampler;

pub mod houses;
pub mod offices;
pub mod roads;
pub mod terrain;

pub use houses::place_houses;
pub use offices::place_offices;
pub use roads::place_roads;
pub use terrain::TerrainMapping;

/// Default fraction range along an edge where houses are placed.
pub const HOUSE_T_RANGE: Range<f32> = 0.2..0.8;
/// Default per-trial threshold range for offices.
pub const OFFICE_THRESHOLD: Range<f32> = 0.0..0.8;

/// Which side of the road a house prefab faces.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HouseVariant {
    Left,
    Right,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Road,
    House(HouseVariant),
    Office,
}

/// A placed road, house or office on the `y = 0` terrain plane.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedAsset {
    /// Position within its own collection.
    pub index: usize,
    /// Display name, unique within its collection (`"Road 3"`, `"House 12"`, ...).
    pub name: String,
    pub kind: AssetKind,
    /// Terrain-space position.
    pub position: Vec3,
    /// Rotation about the vertical axis, in degrees.
    pub angle_deg: f32,
    pub scale: Vec3,
}

impl PlacedAsset {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle_deg.to_radians())
    }
}

/// Counts and ranges driving the placement routines.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Number of houses (NBUILDINGS).
    pub building_count: usize,
    /// Number of offices (NOFFICES).
    pub office_count: usize,
    /// Fraction range along an edge for house placement.
    pub house_t: Range<f32>,
    /// Rejection sampler for office locations.
    pub office_sampler: DensityRejectionSampler,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            building_count: 800,
            office_count: 3,
            house_t: HOUSE_T_RANGE,
            office_sampler: DensityRejectionSampler::new(OFFICE_THRESHOLD),
        }
    }
}

/// Everything placed for one city, in placement order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub roads: Vec<PlacedAsset>,
    pub houses: Vec<PlacedAsset>,
    pub offices: Vec<PlacedAsset>,
}

impl Layout {
    /// Roads, then houses, then offices.
    pub fn place(
        graph: &PlanarGraph,
        field: &DensityField,
        mapping: &TerrainMapping,
        config: &LayoutConfig,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        let mut layout = Layout::default();
        place_roads(&graph.voronoi, mapping, &mut layout.roads);
        place_houses(
            &graph.voronoi,
            mapping,
            config.building_count,
            config.house_t.clone(),
            rng,
            &mut layout.houses,
        )?;
        place_offices(
            field,
            mapping,
            &config.office_sampler,
            config.office_count,
            rng,
            &mut layout.offices,
        )?;

        debug!(
            "Placed {} roads, {} houses, {} offices.",
            layout.roads.len(),
            layout.houses.len(),
            layout.offices.len()
        );
        Ok(layout)
    }

    pub fn house_positions(&self) -> Vec<Vec3> {
        self.houses.iter().map(|h| h.position).collect()
    }

    pub fn office_positions(&self) -> Vec<Vec3> {
        self.offices.iter().map(|o| o.position).collect()
    }
}
