//! Density fields that bias where sites and offices land, and the pixel buffer rendered from them.
//!
//! A [`DensityField`] is generated once per city from coherent noise and stays immutable
//! afterwards. [`PixelBuffer`] is the grayscale view handed to the terrain renderer, and doubles
//! as a debug canvas for drawing graph overlays.
pub mod density;
pub mod pixels;

pub use density::{DensityField, NoiseParams};
pub use pixels::{PixelBuffer, Rgba};
