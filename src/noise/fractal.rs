//! Multi-octave fractal Brownian motion (fBm) over gradient noise.

use serde::{Deserialize, Serialize};

use super::perlin::Perlin2;

/// Configuration for fractal heightmap noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Noise-space units spanned by each grid axis (0.1-30].
    pub scale: f32,
    /// Number of noise octaves (1-20).
    pub octaves: u8,
    /// Amplitude decay per octave (0.1-2.0).
    pub persistence: f32,
    /// Frequency multiplier per octave (0.1-5.0).
    pub lacunarity: f32,
    /// Random seed for reproducible generation.
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            scale: 5.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 42,
        }
    }
}

impl NoiseConfig {
    /// Creates a noise configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Samples normalized fBm built from seeded gradient noise.
///
/// Construction shuffles the permutation table once; sampling is pure
/// arithmetic after that, so a field can be shared across threads.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin2,
    octaves: u8,
    persistence: f32,
    lacunarity: f32,
}

impl NoiseField {
    /// Creates a field with explicit fBm parameters.
    ///
    /// # Panics
    /// Panics if `octaves` is 0 (the amplitude sum would be empty).
    pub fn new(seed: u64, octaves: u8, persistence: f32, lacunarity: f32) -> Self {
        assert!(octaves >= 1, "fBm needs at least one octave");
        Self {
            perlin: Perlin2::new(seed),
            octaves,
            persistence,
            lacunarity,
        }
    }

    /// Creates a field from a noise configuration.
    ///
    /// `scale` is a coordinate-mapping concern of the caller and is not used
    /// here; see the heightmap generator.
    pub fn from_config(config: &NoiseConfig) -> Self {
        Self::new(config.seed, config.octaves, config.persistence, config.lacunarity)
    }

    /// Samples the field at `(x, y)`.
    ///
    /// # Returns
    /// A value in [-1, 1] (the octave sum is normalized by total amplitude).
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0f32;
        let mut amplitude = 1.0f32;
        let mut frequency = 1.0f32;
        let mut max_amplitude = 0.0f32;

        for _ in 0..self.octaves {
            total += self.perlin.noise(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        total / max_amplitude
    }
}
