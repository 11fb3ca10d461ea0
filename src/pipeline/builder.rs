//! Terrain builder: validated, repeatable full rebuilds.

use thiserror::Error;

use crate::config::{ConfigError, SimulationConfig};
use crate::terrain::{Terrain, TerrainSnapshot};

use super::stage::{
    BiomeStage, ClimateStage, ErosionStage, HeightmapStage, NormalStage, Pipeline, PipelineError,
};

/// Errors that can occur during a terrain rebuild.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("a rebuild is already in progress")]
    InProgress,
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("pipeline finished without producing {0}")]
    MissingOutput(&'static str),
}

/// Owns the latest finished terrain and rebuilds it on demand.
///
/// `rebuild` runs the full stage pipeline against a validated copy of the
/// given config. On success the new snapshot replaces the previous one; on
/// any failure the previous snapshot stays available, so callers always have
/// the last good terrain to read or export.
#[derive(Default)]
pub struct TerrainBuilder {
    snapshot: Option<TerrainSnapshot>,
    building: bool,
}

impl TerrainBuilder {
    /// Creates a builder with no terrain yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent successful build, if any.
    pub fn snapshot(&self) -> Option<&TerrainSnapshot> {
        self.snapshot.as_ref()
    }

    /// Returns true while a rebuild is executing.
    pub fn is_building(&self) -> bool {
        self.building
    }

    /// Rebuilds the terrain from scratch with the given configuration.
    pub fn rebuild(&mut self, config: &SimulationConfig) -> Result<&TerrainSnapshot, BuildError> {
        self.rebuild_with_callbacks(config, |_, _, _| {}, |_, _, _| {})
    }

    /// Rebuilds the terrain, reporting stage progress through callbacks.
    ///
    /// The callbacks receive the stage name, its index, and the total stage
    /// count, exactly as [`Pipeline::run_with_callbacks`] reports them.
    pub fn rebuild_with_callbacks<F1, F2>(
        &mut self,
        config: &SimulationConfig,
        on_stage_start: F1,
        on_stage_complete: F2,
    ) -> Result<&TerrainSnapshot, BuildError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        if self.building {
            return Err(BuildError::InProgress);
        }

        // Validate a normalized copy before any stage runs, so a bad config
        // can never cost a partially finished build.
        let mut config = config.clone();
        config.normalize();
        if let Err(err) = config.validate() {
            log::error!("rejecting terrain rebuild: {err}");
            return Err(err.into());
        }

        self.building = true;
        let result = run_pipeline(&config, on_stage_start, on_stage_complete);
        self.building = false;

        match result {
            Ok(snapshot) => {
                log_success(&snapshot.config);
                let snap = self.snapshot.insert(snapshot);
                Ok(&*snap)
            }
            Err(err) => {
                log::error!("terrain rebuild failed: {err}");
                Err(err)
            }
        }
    }
}

/// Assembles the canonical stage order and runs it to completion.
///
/// Erosion runs before normal computation so the normals always describe the
/// final, carved surface.
fn run_pipeline<F1, F2>(
    config: &SimulationConfig,
    on_stage_start: F1,
    on_stage_complete: F2,
) -> Result<TerrainSnapshot, BuildError>
where
    F1: FnMut(&str, usize, usize),
    F2: FnMut(&str, usize, usize),
{
    let mut pipeline = Pipeline::new(config.clone());
    pipeline.add_stage(HeightmapStage);
    if config.erosion.enabled {
        pipeline.add_stage(ErosionStage);
    }
    pipeline.add_stage(NormalStage);
    pipeline.add_stage(ClimateStage);
    pipeline.add_stage(BiomeStage);

    let mut terrain = Terrain::new(config.width, config.depth);
    pipeline.run_with_callbacks(&mut terrain, on_stage_start, on_stage_complete)?;

    let normals = terrain
        .normals
        .take()
        .ok_or(BuildError::MissingOutput("normals"))?;
    let climate = terrain
        .climate
        .take()
        .ok_or(BuildError::MissingOutput("climate"))?;
    let biomes = terrain
        .biomes
        .take()
        .ok_or(BuildError::MissingOutput("biomes"))?;

    Ok(TerrainSnapshot {
        config: config.clone(),
        heights: terrain.heights,
        normals,
        climate,
        biomes,
        erosion: terrain.erosion,
    })
}

/// One greppable line with every parameter that shaped the build.
fn log_success(config: &SimulationConfig) {
    log::info!(
        "regeneration successful | seed={} res={}x{} scale={} octaves={} persistence={} \
         lacunarity={} erosion={} iterations={} velocity={} biomes={} temperature_bias={} \
         moisture_bias={}",
        config.noise.seed,
        config.width,
        config.depth,
        config.noise.scale,
        config.noise.octaves,
        config.noise.persistence,
        config.noise.lacunarity,
        config.erosion.enabled,
        config.erosion.iterations,
        config.erosion.initial_velocity,
        config.climate.biome_overlay,
        config.climate.temperature_bias,
        config.climate.moisture_bias
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> SimulationConfig {
        let mut config = SimulationConfig {
            width: 64,
            depth: 64,
            ..Default::default()
        };
        config.erosion.iterations = 10_000;
        config
    }

    #[test]
    fn test_builder_starts_empty() {
        let builder = TerrainBuilder::new();
        assert!(builder.snapshot().is_none());
        assert!(!builder.is_building());
    }

    #[test]
    fn test_rebuild_produces_complete_snapshot() {
        let mut builder = TerrainBuilder::new();
        let snapshot = builder.rebuild(&quick_config()).unwrap();

        assert_eq!(snapshot.width(), 64);
        assert_eq!(snapshot.depth(), 64);
        assert_eq!(snapshot.normals.normals.len(), 64 * 64);
        assert_eq!(snapshot.climate.temperature_values().len(), 64 * 64);
        assert_eq!(snapshot.biomes.values().len(), 64 * 64);
        assert!(snapshot.erosion.total_eroded > 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_building() {
        let mut config = quick_config();
        config.width = 10;

        let mut builder = TerrainBuilder::new();
        let err = builder.rebuild(&config).unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
        assert!(builder.snapshot().is_none());
        assert!(!builder.is_building());
    }

    #[test]
    fn test_failed_rebuild_keeps_previous_snapshot() {
        let mut builder = TerrainBuilder::new();
        builder.rebuild(&quick_config()).unwrap();

        let mut bad = quick_config();
        bad.noise.octaves = 0;
        assert!(builder.rebuild(&bad).is_err());

        // The old terrain is still there and still complete.
        let snapshot = builder.snapshot().unwrap();
        assert_eq!(snapshot.width(), 64);
        assert_eq!(snapshot.config.noise.octaves, 6);
    }

    #[test]
    fn test_rebuild_normalizes_iterations() {
        let mut config = quick_config();
        config.erosion.iterations = 12_345;

        let mut builder = TerrainBuilder::new();
        let snapshot = builder.rebuild(&config).unwrap();
        assert_eq!(snapshot.config.erosion.iterations, 10_000);
    }

    #[test]
    fn test_callbacks_report_every_stage() {
        let mut names = Vec::new();
        let mut builder = TerrainBuilder::new();
        builder
            .rebuild_with_callbacks(
                &quick_config(),
                |name, _, _| names.push(name.to_string()),
                |_, _, _| {},
            )
            .unwrap();

        assert_eq!(
            names,
            vec![
                "Heightmap Generation",
                "Hydraulic Erosion",
                "Normal Computation",
                "Climate Simulation",
                "Biome Classification",
            ]
        );
    }

    #[test]
    fn test_disabled_erosion_skips_the_stage() {
        let mut config = quick_config();
        config.erosion.enabled = false;

        let mut names = Vec::new();
        let mut builder = TerrainBuilder::new();
        let snapshot = builder
            .rebuild_with_callbacks(
                &config,
                |name, _, _| names.push(name.to_string()),
                |_, _, _| {},
            )
            .unwrap();

        assert!(!names.contains(&"Hydraulic Erosion".to_string()));
        assert_eq!(names.len(), 4);
        assert_eq!(snapshot.erosion.total_eroded, 0.0);
        assert_eq!(snapshot.erosion.total_deposited, 0.0);
    }

    #[test]
    fn test_disabled_overlay_still_builds_climate_and_biomes() {
        // The overlay flag gates export only, never the computation.
        let mut config = quick_config();
        config.climate.biome_overlay = false;

        let mut names = Vec::new();
        let mut builder = TerrainBuilder::new();
        let snapshot = builder
            .rebuild_with_callbacks(
                &config,
                |name, _, _| names.push(name.to_string()),
                |_, _, _| {},
            )
            .unwrap();

        assert!(names.contains(&"Climate Simulation".to_string()));
        assert!(names.contains(&"Biome Classification".to_string()));
        assert_eq!(snapshot.climate.temperature_values().len(), 64 * 64);
        assert_eq!(snapshot.biomes.values().len(), 64 * 64);
    }

    #[test]
    fn test_rebuilds_are_bit_identical() {
        let config = quick_config();

        let mut builder = TerrainBuilder::new();
        let first = builder.rebuild(&config).unwrap().heights.clone();
        let second = builder.rebuild(&config).unwrap();
        assert_eq!(first.values, second.heights.values);
    }
}
