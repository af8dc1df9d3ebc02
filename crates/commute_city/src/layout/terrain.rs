//! Grid-to-terrain coordinate mapping.
use glam::{Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps grid coordinates of a `width x height` field onto the `y = 0` terrain plane, centered on
/// the origin and shrunk by `scaling_factor`.
///
/// Axes are swapped: terrain X comes from grid Y and terrain Z from grid X.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainMapping {
    pub width: f32,
    pub height: f32,
    pub scaling_factor: f32,
}

impl TerrainMapping {
    pub fn new(width: usize, height: usize, scaling_factor: f32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            scaling_factor,
        }
    }

    #[inline]
    pub fn to_terrain(&self, grid: Vec2) -> Vec3 {
        Vec3::new(
            (grid.y - self.height / 2.0) / self.scaling_factor,
            0.0,
            (grid.x - self.width / 2.0) / self.scaling_factor,
        )
    }

    /// Inverse of [`Self::to_terrain`], ignoring the terrain Y component.
    #[inline]
    pub fn to_grid(&self, terrain: Vec3) -> Vec2 {
        Vec2::new(
            terrain.z * self.scaling_factor + self.width / 2.0,
            terrain.x * self.scaling_factor + self.height / 2.0,
        )
    }

    /// Grid length expressed in terrain units.
    #[inline]
    pub fn to_terrain_length(&self, grid_length: f32) -> f32 {
        grid_length / self.scaling_factor
    }
}
