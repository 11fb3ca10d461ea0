//! Deterministic procedural terrain generator.
//!
//! This crate provides tools for generating heightmap terrain with fractal
//! Perlin noise, carving it with droplet hydraulic erosion, and deriving
//! surface normals, climate fields, and biome classifications from the
//! result. A fixed seed reproduces every layer bit for bit.

pub mod biomes;
pub mod climate;
pub mod config;
pub mod erosion;
pub mod export;
pub mod noise;
pub mod pipeline;
pub mod terrain;

pub use biomes::{Biome, BiomeGrid, classify, classify_grid};
pub use climate::{ClimateConfig, ClimateField, generate_climate};
pub use config::{ConfigError, SimulationConfig};
pub use erosion::{ErosionConfig, ErosionStats, erode};
pub use noise::{NoiseConfig, NoiseField};
pub use pipeline::{BuildError, GenerationStage, Pipeline, PipelineError, StageId, TerrainBuilder};
pub use terrain::{
    HeightField, NormalField, Terrain, TerrainSnapshot, compute_normals, generate_heightmap,
};
