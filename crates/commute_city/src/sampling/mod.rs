//! Density-biased sampling of grid points.
//!
//! Sites for the planar graph and office locations are both drawn by the same
//! [`DensityRejectionSampler`]; they only differ in the acceptance threshold range.
//! All randomness flows through a caller-provided [`RngCore`].
use rand::Rng as RngCore;

pub mod rejection;
pub mod sites;

pub use rejection::{DensityRejectionSampler, Sampled};
pub use sites::{Site, SiteSampler};

/// Default trial budget for every rejection loop.
pub const DEFAULT_MAX_TRIALS: usize = 1_000_000;

/// Generate a random float in the range [0, 1).
///
/// Uses the top 24 bits of one `next_u32`, which an `f32` represents exactly.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Uniform float in `[lo, hi)`.
#[inline]
pub fn range_f32(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    let v = lo + rand01(rng) * (hi - lo);
    // Rounding can land exactly on `hi` for wide ranges.
    if v >= hi && hi > lo {
        lo.max(hi - (hi - lo) * f32::EPSILON)
    } else {
        v
    }
}

/// Uniform index in `[lo, hi)`. Returns `lo` when the range is empty.
#[inline]
pub fn range_index(rng: &mut dyn RngCore, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        return lo;
    }
    let span = (hi - lo) as u64;
    lo + ((rng.next_u32() as u64 * span) >> 32) as usize
}
