//! Terrain working state and completed snapshots.

use serde::{Deserialize, Serialize};

use crate::biomes::BiomeGrid;
use crate::climate::ClimateField;
use crate::config::SimulationConfig;
use crate::erosion::ErosionStats;

use super::heightfield::HeightField;
use super::normals::NormalField;

/// Mutable terrain state that pipeline stages fill in.
///
/// Starts as a zero-filled heightfield; each stage populates its layer.
/// Derived layers are skipped on serialization since they can always be
/// recomputed from the heights and config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Elevation grid (filled by the heightmap stage, reshaped by erosion).
    pub heights: HeightField,
    /// Surface normals (populated after the normal stage).
    #[serde(skip)]
    pub normals: Option<NormalField>,
    /// Temperature and moisture fields (populated after the climate stage).
    #[serde(skip)]
    pub climate: Option<ClimateField>,
    /// Biome assignments (populated after the biome stage).
    #[serde(skip)]
    pub biomes: Option<BiomeGrid>,
    /// Erosion totals; zeroed when erosion is disabled.
    #[serde(skip)]
    pub erosion: ErosionStats,
}

impl Terrain {
    /// Creates empty terrain with a zero-filled heightfield.
    pub fn new(width: u32, depth: u32) -> Self {
        Self {
            heights: HeightField::new(width, depth),
            normals: None,
            climate: None,
            biomes: None,
            erosion: ErosionStats::default(),
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.heights.width
    }

    /// Grid depth in cells.
    pub fn depth(&self) -> u32 {
        self.heights.depth
    }

    /// Returns true once every derived layer has been populated.
    pub fn is_complete(&self) -> bool {
        self.normals.is_some() && self.climate.is_some() && self.biomes.is_some()
    }
}

/// A finished terrain build.
///
/// Every layer is present and consistent with `config`. The builder only
/// hands these out after a fully successful pipeline run, so consumers never
/// have to unwrap partially built state.
#[derive(Debug, Clone)]
pub struct TerrainSnapshot {
    /// The normalized config that produced this terrain.
    pub config: SimulationConfig,
    /// Final elevation grid.
    pub heights: HeightField,
    /// Unit surface normals.
    pub normals: NormalField,
    /// Temperature and moisture fields.
    pub climate: ClimateField,
    /// Biome assignments.
    pub biomes: BiomeGrid,
    /// Erosion totals; zeroed when erosion was disabled.
    pub erosion: ErosionStats,
}

impl TerrainSnapshot {
    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.heights.width
    }

    /// Grid depth in cells.
    pub fn depth(&self) -> u32 {
        self.heights.depth
    }
}
