//! Climate simulation.
//!
//! Produces per-cell temperature and moisture fields from a shared noise
//! field and the terrain heights. Both fields are normalized to [0, 1] and
//! feed the biome classifier.

mod config;
mod moisture;
mod temperature;

pub use config::ClimateConfig;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::noise::NoiseField;
use crate::terrain::HeightField;

/// Octave count for the shared climate noise field.
const CLIMATE_OCTAVES: u8 = 3;
/// Persistence for the shared climate noise field.
const CLIMATE_PERSISTENCE: f32 = 0.5;
/// Lacunarity for the shared climate noise field.
const CLIMATE_LACUNARITY: f32 = 2.0;

/// Per-cell climate data for a terrain grid.
///
/// Temperature and moisture are stored row-major, matching the height field
/// layout, each value in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateField {
    width: u32,
    depth: u32,
    temperature: Vec<f32>,
    moisture: Vec<f32>,
}

impl ClimateField {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid depth in cells.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Temperature at `(x, z)`, in [0, 1].
    #[inline]
    pub fn temperature(&self, x: u32, z: u32) -> f32 {
        debug_assert!(x < self.width && z < self.depth);
        self.temperature[(z * self.width + x) as usize]
    }

    /// Moisture at `(x, z)`, in [0, 1].
    #[inline]
    pub fn moisture(&self, x: u32, z: u32) -> f32 {
        debug_assert!(x < self.width && z < self.depth);
        self.moisture[(z * self.width + x) as usize]
    }

    /// All temperature values in row-major order.
    pub fn temperature_values(&self) -> &[f32] {
        &self.temperature
    }

    /// All moisture values in row-major order.
    pub fn moisture_values(&self) -> &[f32] {
        &self.moisture
    }
}

/// Generate temperature and moisture fields for a height field.
///
/// A single low-frequency noise field drives both outputs, so warm and wet
/// regions correlate spatially instead of looking like independent static.
/// Elevation then cools and dries each cell before the configured biases are
/// applied.
pub fn generate_climate(heights: &HeightField, seed: u64, config: &ClimateConfig) -> ClimateField {
    let width = heights.width;
    let depth = heights.depth;
    if width == 0 || depth == 0 {
        return ClimateField {
            width,
            depth,
            temperature: Vec::new(),
            moisture: Vec::new(),
        };
    }
    let field = NoiseField::new(seed, CLIMATE_OCTAVES, CLIMATE_PERSISTENCE, CLIMATE_LACUNARITY);

    // Roughly three noise periods across the short axis of the grid.
    let frequency = 3.0 / width.min(depth) as f32;

    let cells = (width as usize) * (depth as usize);
    let mut temperature = vec![0.0f32; cells];
    let mut moisture = vec![0.0f32; cells];

    temperature
        .par_chunks_mut(width as usize)
        .zip(moisture.par_chunks_mut(width as usize))
        .enumerate()
        .for_each(|(z, (temp_row, moist_row))| {
            let nz = z as f32 * frequency;
            for x in 0..width as usize {
                let nx = x as f32 * frequency;
                let raw = field.sample(nx, nz);
                let height = heights.get(x as u32, z as u32);
                temp_row[x] = temperature::temperature_at(raw, height, config.temperature_bias);
                moist_row[x] = moisture::moisture_at(raw, height, config.moisture_bias);
            }
        });

    ClimateField {
        width,
        depth,
        temperature,
        moisture,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseConfig;
    use crate::terrain::generate_heightmap;

    fn test_heights() -> HeightField {
        generate_heightmap(48, 48, &NoiseConfig::with_seed(99))
    }

    #[test]
    fn test_climate_values_in_unit_range() {
        let heights = test_heights();
        let climate = generate_climate(&heights, 7, &ClimateConfig::default());
        for z in 0..climate.depth() {
            for x in 0..climate.width() {
                let t = climate.temperature(x, z);
                let m = climate.moisture(x, z);
                assert!((0.0..=1.0).contains(&t), "t = {t} at ({x}, {z})");
                assert!((0.0..=1.0).contains(&m), "m = {m} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn test_climate_is_deterministic() {
        let heights = test_heights();
        let config = ClimateConfig::default();
        let a = generate_climate(&heights, 123, &config);
        let b = generate_climate(&heights, 123, &config);
        assert_eq!(a.temperature_values(), b.temperature_values());
        assert_eq!(a.moisture_values(), b.moisture_values());
    }

    #[test]
    fn test_different_seeds_differ() {
        let heights = test_heights();
        let config = ClimateConfig::default();
        let a = generate_climate(&heights, 1, &config);
        let b = generate_climate(&heights, 2, &config);
        assert_ne!(a.temperature_values(), b.temperature_values());
    }

    #[test]
    fn test_altitude_cools_and_dries() {
        // Two flat fields at opposite height extremes, same seed: the high
        // field must be uniformly colder and drier.
        let mut low = HeightField::new(32, 32);
        let mut high = HeightField::new(32, 32);
        for z in 0..32 {
            for x in 0..32 {
                low.set(x, z, -1.0);
                high.set(x, z, 1.0);
            }
        }
        let config = ClimateConfig::default();
        let cold = generate_climate(&high, 5, &config);
        let warm = generate_climate(&low, 5, &config);
        for z in 0..32 {
            for x in 0..32 {
                assert!(cold.temperature(x, z) <= warm.temperature(x, z));
                assert!(cold.moisture(x, z) <= warm.moisture(x, z));
            }
        }
    }

    #[test]
    fn test_rectangular_grid_dimensions() {
        let heights = generate_heightmap(64, 32, &NoiseConfig::with_seed(4));
        let climate = generate_climate(&heights, 4, &ClimateConfig::default());
        assert_eq!(climate.width(), 64);
        assert_eq!(climate.depth(), 32);
        assert_eq!(climate.temperature_values().len(), 64 * 32);
        assert_eq!(climate.moisture_values().len(), 64 * 32);
    }

    #[test]
    fn test_zero_sized_field_yields_empty_climate() {
        let heights = HeightField::new(0, 16);
        let climate = generate_climate(&heights, 1, &ClimateConfig::default());
        assert_eq!(climate.width(), 0);
        assert!(climate.temperature_values().is_empty());
        assert!(climate.moisture_values().is_empty());
    }
}
