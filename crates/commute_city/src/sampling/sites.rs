//! Site sampling for the planar graph.
use glam::UVec2;
use rand::Rng as RngCore;

use crate::error::Result;
use crate::field::DensityField;
use crate::sampling::DensityRejectionSampler;

/// A graph site in grid coordinates.
pub type Site = UVec2;

/// Default per-trial threshold range for sites.
pub const SITE_THRESHOLD: std::ops::Range<f32> = 0.4..0.8;

/// Samples a fixed number of sites, in draw order, biased toward dense regions of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSampler {
    pub sampler: DensityRejectionSampler,
}

impl Default for SiteSampler {
    fn default() -> Self {
        Self {
            sampler: DensityRejectionSampler::new(SITE_THRESHOLD),
        }
    }
}

impl SiteSampler {
    pub fn new(sampler: DensityRejectionSampler) -> Self {
        Self { sampler }
    }

    pub fn with_max_trials(max_trials: usize) -> Self {
        Self {
            sampler: DensityRejectionSampler::new(SITE_THRESHOLD).with_max_trials(max_trials),
        }
    }

    pub fn sample(
        &self,
        field: &DensityField,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Site>> {
        Ok(self.sampler.sample(field, count, "sites", rng)?.points)
    }
}
