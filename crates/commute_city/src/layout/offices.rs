//! Offices on density-biased grid points.
use glam::Vec3;
use rand::Rng as RngCore;

use crate::error::Result;
use crate::field::DensityField;
use crate::layout::{AssetKind, PlacedAsset, TerrainMapping};
use crate::sampling::{range_f32, DensityRejectionSampler};

/// Append `count` offices at points accepted by `sampler`, each with a random footprint
/// (x and z in `[0.7, 1.0)`) and height (`[1.5, 2.0)`).
pub fn place_offices(
    field: &DensityField,
    mapping: &TerrainMapping,
    sampler: &DensityRejectionSampler,
    count: usize,
    rng: &mut dyn RngCore,
    offices: &mut Vec<PlacedAsset>,
) -> Result<()> {
    let sampled = sampler.sample(field, count, "offices", rng)?;

    offices.reserve(sampled.points.len());
    for point in sampled.points {
        let scale = Vec3::new(
            range_f32(rng, 0.7, 1.0),
            range_f32(rng, 1.5, 2.0),
            range_f32(rng, 0.7, 1.0),
        );
        let index = offices.len();
        offices.push(PlacedAsset {
            index,
            name: format!("Office {index}"),
            kind: AssetKind::Office,
            position: mapping.to_terrain(point.as_vec2()),
            angle_deg: 0.0,
            scale,
        });
    }
    Ok(())
}
