//! Noise generation for terrain synthesis.
//!
//! Scalar permutation-table gradient noise plus normalized fBm on top.
//! Everything here is bit-deterministic for a given seed.

mod fractal;
mod perlin;

pub use fractal::{NoiseConfig, NoiseField};
pub use perlin::Perlin2;
