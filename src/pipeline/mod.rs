//! Pipeline module for orchestrating terrain generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that can be composed into a complete terrain generation pipeline, plus
//! the [`TerrainBuilder`] that runs the canonical stage order.

mod builder;
mod stage;

pub use builder::{BuildError, TerrainBuilder};
pub use stage::{
    BiomeStage, ClimateStage, ErosionStage, GenerationStage, HeightmapStage, NormalStage,
    Pipeline, PipelineError, StageId,
};
