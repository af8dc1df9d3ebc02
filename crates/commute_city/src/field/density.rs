//! Coherent-noise density field over an integer grid.
use glam::Vec2;
use noise::{NoiseFn, Perlin};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameters of the coherent noise sampled at every grid cell.
///
/// Cell `(x, y)` reads the noise at `(frequency.x * x + offset.x, frequency.y * y + offset.y)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    /// Per-axis frequency applied to grid indices.
    pub frequency: Vec2,
    /// Per-axis offset added after scaling.
    pub offset: Vec2,
    /// Seed of the underlying permutation table.
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            frequency: Vec2::new(0.02, 0.018),
            offset: Vec2::new(0.43, 0.22),
            seed: 0,
        }
    }
}

impl NoiseParams {
    pub fn new(frequency: Vec2, offset: Vec2) -> Self {
        Self {
            frequency,
            offset,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Check that every noise coordinate of a `width x height` grid is finite and within
    /// [`MAX_NOISE_COORDINATE`].
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        let axes = [
            ("x", self.frequency.x, self.offset.x, width),
            ("y", self.frequency.y, self.offset.y, height),
        ];
        for (axis, frequency, offset, len) in axes {
            if !frequency.is_finite() || !offset.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "noise frequency and offset on {axis} must be finite"
                )));
            }
            // Coordinates are linear in the index, so the ends of the axis bound them.
            let last = frequency as f64 * len.saturating_sub(1) as f64 + offset as f64;
            if (offset as f64).abs() > MAX_NOISE_COORDINATE || last.abs() > MAX_NOISE_COORDINATE {
                return Err(Error::InvalidConfig(format!(
                    "noise coordinates on {axis} exceed +/-{MAX_NOISE_COORDINATE:e}"
                )));
            }
        }
        Ok(())
    }
}

/// Largest absolute noise-space coordinate accepted by [`DensityField::generate`].
pub const MAX_NOISE_COORDINATE: f64 = 1.0e12;

/// A `width x height` grid of scalar values in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DensityField {
    /// Sample Perlin noise over the grid and normalize it into `[0, 1]`.
    ///
    /// Deterministic for identical inputs.
    pub fn generate(width: usize, height: usize, params: &NoiseParams) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "density field dimensions must be > 0".into(),
            ));
        }
        params.validate(width, height)?;

        let perlin = Perlin::new(params.seed);
        let fx = params.frequency.x as f64;
        let fy = params.frequency.y as f64;
        let ox = params.offset.x as f64;
        let oy = params.offset.y as f64;

        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let raw = perlin.get([fx * x as f64 + ox, fy * y as f64 + oy]);
                data.push(normalize_noise(raw));
            }
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a field from row-major values (`data[y * width + x]`).
    pub fn from_values(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "density field dimensions must be > 0".into(),
            ));
        }
        if data.len() != width * height {
            return Err(Error::InvalidConfig(format!(
                "expected {} density values, got {}",
                width * height,
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(Error::InvalidConfig(format!(
                "density value {bad} is outside [0, 1]"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A field holding the same value everywhere.
    pub fn constant(width: usize, height: usize, value: f32) -> Result<Self> {
        Self::from_values(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Five-point neighborhood average used by the rejection samplers.
    ///
    /// Reads `(x-1, y-1)`, `(x+1, y+1)`, `(x+1, y)`, `(x, y+1)` and `(x, y)`. Returns `None` when
    /// any of them falls outside the grid.
    pub fn mean_neighbors(&self, x: usize, y: usize) -> Option<f32> {
        let xm = x.checked_sub(1)?;
        let ym = y.checked_sub(1)?;
        let sum = self.get(xm, ym)?
            + self.get(x + 1, y + 1)?
            + self.get(x + 1, y)?
            + self.get(x, y + 1)?
            + self.get(x, y)?;
        Some(sum / 5.0)
    }
}

#[inline]
fn normalize_noise(value: f64) -> f32 {
    ((value * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
}
