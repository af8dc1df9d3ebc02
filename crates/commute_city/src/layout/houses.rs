//! Houses scattered along randomly chosen Voronoi edges.
use std::ops::Range;

use glam::Vec3;
use rand::Rng as RngCore;

use crate::error::{Error, Result};
use crate::graph::GraphEdge;
use crate::layout::{AssetKind, HouseVariant, PlacedAsset, TerrainMapping};
use crate::sampling::{rand01, range_f32, range_index};

/// Append `count` houses. Each picks an edge uniformly (with replacement), a fraction `t` from
/// `t_range` along it and a left/right variant, and faces along the edge.
pub fn place_houses(
    edges: &[GraphEdge],
    mapping: &TerrainMapping,
    count: usize,
    t_range: Range<f32>,
    rng: &mut dyn RngCore,
    houses: &mut Vec<PlacedAsset>,
) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    if edges.is_empty() {
        return Err(Error::EmptyCollection {
            what: "voronoi edges",
        });
    }

    houses.reserve(count);
    for _ in 0..count {
        let edge = &edges[range_index(rng, 0, edges.len())];
        let t = range_f32(rng, t_range.start, t_range.end);
        let variant = if rand01(rng) > 0.5 {
            HouseVariant::Left
        } else {
            HouseVariant::Right
        };

        let index = houses.len();
        houses.push(PlacedAsset {
            index,
            name: format!("House {index}"),
            kind: AssetKind::House(variant),
            position: mapping.to_terrain(edge.lerp(t)),
            angle_deg: edge.angle_deg(),
            scale: Vec3::ONE,
        });
    }
    Ok(())
}
