//! Generation stage trait and pipeline orchestration.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::biomes::classify_grid;
use crate::climate::generate_climate;
use crate::config::SimulationConfig;
use crate::erosion::erode;
use crate::terrain::{Terrain, compute_normals, generate_heightmap};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Initial heightmap generation from noise.
    Heightmap,
    /// Droplet hydraulic erosion.
    Erosion,
    /// Surface normal computation.
    Normals,
    /// Temperature and moisture fields.
    Climate,
    /// Biome classification.
    Biomes,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Heightmap => "heightmap",
            StageId::Erosion => "erosion",
            StageId::Normals => "normals",
            StageId::Climate => "climate",
            StageId::Biomes => "biomes",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the terrain in some way, building upon previous
/// stages. The trait-based design allows for modular composition and easy
/// extension with new generation phases.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the terrain in place.
    ///
    /// # Arguments
    /// * `terrain` - The terrain to modify
    /// * `config` - Simulation configuration parameters
    ///
    /// # Returns
    /// `Ok(())` on success, or an error describing what went wrong
    fn execute(&self, terrain: &mut Terrain, config: &SimulationConfig)
    -> Result<(), PipelineError>;

    /// Optional progress callback for long-running stages.
    ///
    /// # Arguments
    /// * `progress` - Value from 0.0 to 1.0 indicating completion
    fn on_progress(&self, _progress: f32) {
        // Default: do nothing
    }
}

/// Orchestrates multiple generation stages into a complete pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: SimulationConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given terrain.
    ///
    /// # Arguments
    /// * `terrain` - The terrain to generate
    ///
    /// # Returns
    /// `Ok(())` if all stages complete successfully
    pub fn run(&self, terrain: &mut Terrain) -> Result<(), PipelineError> {
        let mut completed: Vec<StageId> = Vec::new();

        for stage in &self.stages {
            // Check dependencies
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            // Execute stage
            stage.execute(terrain, &self.config)?;
            completed.push(stage.id());
        }

        Ok(())
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `terrain` - The terrain to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        terrain: &mut Terrain,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            // Check dependencies
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            // Execute stage
            stage.execute(terrain, &self.config)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Heightmap generation stage using fractal noise.
pub struct HeightmapStage;

impl GenerationStage for HeightmapStage {
    fn id(&self) -> StageId {
        StageId::Heightmap
    }

    fn name(&self) -> &str {
        "Heightmap Generation"
    }

    fn execute(
        &self,
        terrain: &mut Terrain,
        config: &SimulationConfig,
    ) -> Result<(), PipelineError> {
        terrain.heights = generate_heightmap(config.width, config.depth, &config.noise);
        Ok(())
    }
}

/// Droplet hydraulic erosion stage.
pub struct ErosionStage;

impl GenerationStage for ErosionStage {
    fn id(&self) -> StageId {
        StageId::Erosion
    }

    fn name(&self) -> &str {
        "Hydraulic Erosion"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(
        &self,
        terrain: &mut Terrain,
        config: &SimulationConfig,
    ) -> Result<(), PipelineError> {
        // The stage snaps the iteration count itself, so a pipeline assembled
        // without the builder still runs the canonical droplet count.
        let iterations = config.erosion.snapped_iterations();
        let mut rng = ChaCha8Rng::seed_from_u64(config.erosion.seed);

        let stats = erode(
            &mut terrain.heights,
            iterations,
            config.erosion.initial_velocity,
            &mut rng,
        );
        log::debug!(
            "erosion: {} droplets eroded {:.3} and deposited {:.3} in {:?}",
            iterations,
            stats.total_eroded,
            stats.total_deposited,
            stats.duration
        );
        terrain.erosion = stats;
        Ok(())
    }
}

/// Surface normal computation stage.
pub struct NormalStage;

impl GenerationStage for NormalStage {
    fn id(&self) -> StageId {
        StageId::Normals
    }

    fn name(&self) -> &str {
        "Normal Computation"
    }

    fn dependencies(&self) -> &[StageId] {
        // Normals read whatever heights are current; the builder orders this
        // stage after erosion when erosion is enabled.
        &[StageId::Heightmap]
    }

    fn execute(
        &self,
        terrain: &mut Terrain,
        _config: &SimulationConfig,
    ) -> Result<(), PipelineError> {
        terrain.normals = Some(compute_normals(&terrain.heights));
        Ok(())
    }
}

/// Climate simulation stage: temperature and moisture fields.
pub struct ClimateStage;

impl GenerationStage for ClimateStage {
    fn id(&self) -> StageId {
        StageId::Climate
    }

    fn name(&self) -> &str {
        "Climate Simulation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(
        &self,
        terrain: &mut Terrain,
        config: &SimulationConfig,
    ) -> Result<(), PipelineError> {
        // Climate shares the heightmap seed so one seed reproduces the
        // entire world.
        terrain.climate = Some(generate_climate(
            &terrain.heights,
            config.noise.seed,
            &config.climate,
        ));
        Ok(())
    }
}

/// Biome classification stage.
pub struct BiomeStage;

impl GenerationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biomes
    }

    fn name(&self) -> &str {
        "Biome Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Climate]
    }

    fn execute(
        &self,
        terrain: &mut Terrain,
        _config: &SimulationConfig,
    ) -> Result<(), PipelineError> {
        let climate = terrain.climate.as_ref().ok_or_else(|| {
            PipelineError::StageFailed(
                self.name().to_string(),
                "missing climate data (run the climate stage first)".to_string(),
            )
        })?;
        terrain.biomes = Some(classify_grid(climate));
        Ok(())
    }
}
