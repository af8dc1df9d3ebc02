//! Rejection sampling of grid points against a randomly redrawn density threshold.
use std::ops::Range;

use glam::UVec2;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::DensityField;
use crate::sampling::{range_f32, range_index, DEFAULT_MAX_TRIALS};

/// Draws uniformly random interior grid points and keeps those whose five-point
/// neighborhood mean reaches a threshold drawn fresh from `threshold` on every trial.
///
/// Candidates are drawn with `margin_low <= x < width - margin_high` (likewise for `y`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DensityRejectionSampler {
    /// Range the per-trial acceptance threshold is drawn from.
    pub threshold: Range<f32>,
    /// Lowest candidate index on each axis.
    pub margin_low: usize,
    /// Distance of the exclusive upper candidate bound from the grid edge.
    pub margin_high: usize,
    /// Trials allowed before giving up.
    pub max_trials: usize,
}

/// Accepted points in draw order plus the number of trials it took.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sampled {
    pub points: Vec<UVec2>,
    pub trials: usize,
}

impl DensityRejectionSampler {
    pub fn new(threshold: Range<f32>) -> Self {
        Self {
            threshold,
            margin_low: 1,
            margin_high: 2,
            max_trials: DEFAULT_MAX_TRIALS,
        }
    }

    pub fn with_margins(mut self, margin_low: usize, margin_high: usize) -> Self {
        self.margin_low = margin_low;
        self.margin_high = margin_high;
        self
    }

    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Check that the sampler leaves a non-empty interior on a `width x height` grid.
    pub fn validate(&self, width: usize, height: usize) -> Result<()> {
        if !self.threshold.start.is_finite()
            || !self.threshold.end.is_finite()
            || self.threshold.start > self.threshold.end
        {
            return Err(Error::InvalidConfig(format!(
                "threshold range {:?} is not a finite ascending range",
                self.threshold
            )));
        }
        if self.margin_low < 1 || self.margin_high < 1 {
            return Err(Error::InvalidConfig(
                "margins must be >= 1 so the neighborhood stays inside the grid".into(),
            ));
        }
        let min_dim = self.margin_low + self.margin_high + 1;
        if width < min_dim || height < min_dim {
            return Err(Error::InvalidConfig(format!(
                "grid {width}x{height} leaves no interior for margins {}..{}",
                self.margin_low, self.margin_high
            )));
        }
        if self.max_trials == 0 {
            return Err(Error::InvalidConfig("max_trials must be > 0".into()));
        }
        Ok(())
    }

    /// Collect exactly `count` accepted points, or fail once the trial budget is spent.
    ///
    /// `what` names the sampled items in logs and errors.
    pub fn sample(
        &self,
        field: &DensityField,
        count: usize,
        what: &'static str,
        rng: &mut dyn RngCore,
    ) -> Result<Sampled> {
        self.validate(field.width(), field.height())?;

        let x_end = field.width() - self.margin_high;
        let y_end = field.height() - self.margin_high;

        let mut points = Vec::with_capacity(count);
        let mut trials = 0;
        while points.len() < count {
            if trials >= self.max_trials {
                return Err(Error::SamplingExhausted {
                    what,
                    accepted: points.len(),
                    requested: count,
                    trials,
                });
            }
            trials += 1;

            let x = range_index(rng, self.margin_low, x_end);
            let y = range_index(rng, self.margin_low, y_end);
            let Some(mean) = field.mean_neighbors(x, y) else {
                continue;
            };
            let threshold = range_f32(rng, self.threshold.start, self.threshold.end);
            if mean >= threshold {
                points.push(UVec2::new(x as u32, y as u32));
            }
        }

        debug!("Sampled {} {} in {} trials.", points.len(), what, trials);
        Ok(Sampled { points, trials })
    }
}
