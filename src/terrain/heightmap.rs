//! Heightmap generation from fractal noise.

use rayon::prelude::*;

use super::heightfield::HeightField;
use crate::noise::{NoiseConfig, NoiseField};

/// Generates a heightmap by sampling fBm across the grid.
///
/// Cell `(x, z)` samples noise space at `(x / width * scale, z / depth * scale)`,
/// so `scale` sets how many noise units each axis spans regardless of grid
/// resolution. Rows are filled in parallel; every cell depends only on its own
/// coordinates, so thread scheduling cannot change the output and two runs with
/// the same config produce bit-identical fields. A zero-sized axis yields an
/// empty field.
///
/// # Arguments
/// * `width` - Grid width in cells
/// * `depth` - Grid depth in cells
/// * `config` - Noise parameters (scale, octaves, persistence, lacunarity, seed)
pub fn generate_heightmap(width: u32, depth: u32, config: &NoiseConfig) -> HeightField {
    let mut field = HeightField::new(width, depth);
    if width == 0 || depth == 0 {
        return field;
    }
    let noise = NoiseField::from_config(config);
    let scale = config.scale;

    field
        .values
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(z, row)| {
            let nz = z as f32 / depth as f32 * scale;
            for (x, height) in row.iter_mut().enumerate() {
                let nx = x as f32 / width as f32 * scale;
                *height = noise.sample(nx, nz);
            }
        });

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_heightmap() {
        let config = NoiseConfig::default();
        let field = generate_heightmap(64, 64, &config);

        assert_eq!(field.values.len(), 64 * 64);
        assert!(
            field.values.iter().any(|&h| h != 0.0),
            "Heightmap should have non-zero values"
        );

        let (min, max) = field.height_range();
        assert!(min >= -1.0 && max <= 1.0, "Heights should stay in the normalized band");
    }

    #[test]
    fn test_heightmap_reproducibility() {
        let config = NoiseConfig::with_seed(999);

        let a = generate_heightmap(50, 50, &config);
        let b = generate_heightmap(50, 50, &config);

        assert_eq!(a.values, b.values, "Same configuration should produce identical heights");
    }

    #[test]
    fn test_rectangular_grid() {
        let config = NoiseConfig::with_seed(7);
        let field = generate_heightmap(60, 50, &config);

        assert_eq!(field.width, 60);
        assert_eq!(field.depth, 50);
        assert_eq!(field.values.len(), 60 * 50);
    }

    #[test]
    fn test_scale_maps_axes_to_noise_space() {
        // With scale equal to the axis length the sample coords hit the
        // integer lattice, where gradient noise is exactly zero.
        let config = NoiseConfig {
            scale: 4.0,
            octaves: 1,
            persistence: 1.0,
            lacunarity: 1.0,
            seed: 42,
        };
        let field = generate_heightmap(4, 4, &config);
        assert!(field.values.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_heightmap(50, 50, &NoiseConfig::with_seed(1));
        let b = generate_heightmap(50, 50, &NoiseConfig::with_seed(2));
        assert_ne!(a.values, b.values);
    }

    #[test]
    fn test_zero_sized_axes_yield_empty_fields() {
        let config = NoiseConfig::default();
        assert!(generate_heightmap(0, 50, &config).values.is_empty());
        assert!(generate_heightmap(50, 0, &config).values.is_empty());
        assert!(generate_heightmap(0, 0, &config).values.is_empty());
    }
}
