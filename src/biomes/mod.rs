//! Biome classification.
//!
//! Consumes the normalized climate fields (temperature and moisture, both in
//! [0, 1]) and assigns every cell one of seven biomes. Classification is a
//! pure threshold cascade; any input, including NaN, maps to some biome.

use serde::{Deserialize, Serialize};

use crate::climate::ClimateField;

/// Biome classification. `as_u8()` is stable and used for storage/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Tundra = 0,
    Taiga = 1,
    Desert = 2,
    Rainforest = 3,
    Savanna = 4,
    Grassland = 5,
    Temperate = 6,
}

impl Biome {
    /// All biomes, in discriminant order.
    pub const ALL: [Biome; 7] = [
        Biome::Tundra,
        Biome::Taiga,
        Biome::Desert,
        Biome::Rainforest,
        Biome::Savanna,
        Biome::Grassland,
        Biome::Temperate,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Tundra => "Tundra",
            Biome::Taiga => "Taiga",
            Biome::Desert => "Desert",
            Biome::Rainforest => "Rainforest",
            Biome::Savanna => "Savanna",
            Biome::Grassland => "Grassland",
            Biome::Temperate => "Temperate",
        }
    }

    /// RGB preview color for this biome.
    pub fn preview_rgb(self) -> [u8; 3] {
        match self {
            Biome::Tundra => [200, 200, 210],
            Biome::Taiga => [95, 120, 95],
            Biome::Desert => [210, 185, 125],
            Biome::Rainforest => [25, 100, 40],
            Biome::Savanna => [180, 165, 80],
            Biome::Grassland => [120, 170, 80],
            Biome::Temperate => [60, 140, 60],
        }
    }
}

/// Classify a single cell from normalized temperature and moisture.
///
/// Cold band below 0.3, hot band above 0.7, temperate in between; moisture
/// splits each band. NaN comparisons are all false, so non-finite inputs fall
/// through to [`Biome::Temperate`].
pub fn classify(temperature: f32, moisture: f32) -> Biome {
    if temperature < 0.3 {
        if moisture < 0.4 {
            return Biome::Tundra;
        }
        return Biome::Taiga;
    }

    if temperature > 0.7 {
        if moisture < 0.2 {
            return Biome::Desert;
        }
        if moisture > 0.8 {
            return Biome::Rainforest;
        }
        return Biome::Savanna;
    }

    if moisture < 0.3 {
        return Biome::Grassland;
    }
    Biome::Temperate
}

/// Per-cell biome assignments for a terrain grid, row-major.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeGrid {
    width: u32,
    depth: u32,
    biomes: Vec<Biome>,
}

impl BiomeGrid {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid depth in cells.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Biome at `(x, z)`.
    #[inline]
    pub fn get(&self, x: u32, z: u32) -> Biome {
        debug_assert!(x < self.width && z < self.depth);
        self.biomes[(z * self.width + x) as usize]
    }

    /// All biomes in row-major order.
    pub fn values(&self) -> &[Biome] {
        &self.biomes
    }
}

/// Classify every cell of a climate field.
pub fn classify_grid(climate: &ClimateField) -> BiomeGrid {
    let width = climate.width();
    let depth = climate.depth();
    let biomes = climate
        .temperature_values()
        .iter()
        .zip(climate.moisture_values())
        .map(|(&t, &m)| classify(t, m))
        .collect();

    BiomeGrid {
        width,
        depth,
        biomes,
    }
}
