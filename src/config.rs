//! Simulation-wide configuration.
//!
//! All generation parameters are explicit values threaded through the
//! pipeline; nothing reads global state. Configs are serde-derived so runs
//! can be saved and replayed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::climate::ClimateConfig;
use crate::erosion::ErosionConfig;
use crate::noise::NoiseConfig;

/// Errors from configuration validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be in [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("noise scale must be greater than {min} and at most {max}, got {value}")]
    ScaleOutOfRange { value: f32, min: f32, max: f32 },
}

/// Complete parameter set for one terrain build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Grid width in cells (50-200).
    pub width: u32,
    /// Grid depth in cells (50-200).
    pub depth: u32,
    /// Base heightmap noise parameters.
    pub noise: NoiseConfig,
    /// Hydraulic erosion parameters.
    pub erosion: ErosionConfig,
    /// Climate and biome parameters.
    pub climate: ClimateConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 100,
            depth: 100,
            noise: NoiseConfig::default(),
            erosion: ErosionConfig::default(),
            climate: ClimateConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Snap free-form fields to their canonical values.
    ///
    /// Currently this rounds the erosion iteration count to its step size.
    /// Runs with the same normalized config are bit-identical, so callers
    /// should normalize before comparing or persisting configs.
    pub fn normalize(&mut self) {
        self.erosion.iterations = self.erosion.snapped_iterations();
    }

    /// Check every parameter against its allowed range.
    ///
    /// Returns the first violation found. NaN fails every range check. The
    /// iteration count is checked after snapping, so `validate` gives the
    /// same verdict whether or not [`normalize`](Self::normalize) ran first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_u32("width", self.width, 50, 200)?;
        check_u32("depth", self.depth, 50, 200)?;

        // Exclusive lower bound: a scale of exactly 0.1 would collapse the
        // noise frequency below anything the generator resolves.
        if !(self.noise.scale > 0.1 && self.noise.scale <= 30.0) {
            return Err(ConfigError::ScaleOutOfRange {
                value: self.noise.scale,
                min: 0.1,
                max: 30.0,
            });
        }
        check_u32("octaves", u32::from(self.noise.octaves), 1, 20)?;
        check_f32("persistence", self.noise.persistence, 0.1, 2.0)?;
        check_f32("lacunarity", self.noise.lacunarity, 0.1, 5.0)?;

        check_u32(
            "erosion iterations",
            self.erosion.snapped_iterations(),
            10_000,
            1_000_000,
        )?;
        check_f32(
            "erosion initial velocity",
            self.erosion.initial_velocity,
            0.0,
            3.0,
        )?;

        check_f32("temperature bias", self.climate.temperature_bias, 0.0, 1.0)?;
        check_f32("moisture bias", self.climate.moisture_bias, 0.0, 1.0)?;

        Ok(())
    }
}

fn check_u32(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        })
    }
}

fn check_f32(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    // Written so NaN falls into the error arm.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value: f64::from(value),
            min: f64::from(min),
            max: f64::from(max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_is_already_normalized() {
        let mut config = SimulationConfig::default();
        let before = config.erosion.iterations;
        config.normalize();
        assert_eq!(config.erosion.iterations, before);
    }

    #[test]
    fn test_resolution_bounds() {
        let mut config = SimulationConfig::default();
        config.width = 49;
        assert!(config.validate().is_err());
        config.width = 50;
        assert!(config.validate().is_ok());
        config.width = 200;
        assert!(config.validate().is_ok());
        config.width = 201;
        assert!(config.validate().is_err());

        config.width = 100;
        config.depth = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scale_lower_bound_is_exclusive() {
        let mut config = SimulationConfig::default();
        config.noise.scale = 0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ScaleOutOfRange { .. })
        ));
        config.noise.scale = 0.100001;
        assert!(config.validate().is_ok());
        config.noise.scale = 30.0;
        assert!(config.validate().is_ok());
        config.noise.scale = 30.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_octave_bounds() {
        let mut config = SimulationConfig::default();
        config.noise.octaves = 0;
        assert!(config.validate().is_err());
        config.noise.octaves = 20;
        assert!(config.validate().is_ok());
        config.noise.octaves = 21;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_persistence_and_lacunarity_bounds() {
        let mut config = SimulationConfig::default();
        config.noise.persistence = 0.05;
        assert!(config.validate().is_err());
        config.noise.persistence = 2.0;
        assert!(config.validate().is_ok());

        config.noise.persistence = 0.5;
        config.noise.lacunarity = 5.5;
        assert!(config.validate().is_err());
        config.noise.lacunarity = 0.1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_iterations_validated_after_snapping() {
        let mut config = SimulationConfig::default();
        // 5 000 snaps up to 10 000, which is in range.
        config.erosion.iterations = 5_000;
        assert!(config.validate().is_ok());
        // 4 999 snaps down to 0, which is not.
        config.erosion.iterations = 4_999;
        assert!(config.validate().is_err());
        // 1 004 999 snaps back down to the maximum.
        config.erosion.iterations = 1_004_999;
        assert!(config.validate().is_ok());
        config.erosion.iterations = 1_005_000;
        assert!(config.validate().is_err());
        // Counts near the integer limit must fail the range check, not wrap.
        config.erosion.iterations = u32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_velocity_and_bias_bounds() {
        let mut config = SimulationConfig::default();
        config.erosion.initial_velocity = -0.1;
        assert!(config.validate().is_err());
        config.erosion.initial_velocity = 3.0;
        assert!(config.validate().is_ok());

        config.erosion.initial_velocity = 1.0;
        config.climate.temperature_bias = 1.5;
        assert!(config.validate().is_err());
        config.climate.temperature_bias = 1.0;
        config.climate.moisture_bias = -0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut config = SimulationConfig::default();
        config.noise.persistence = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.noise.scale = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.climate.moisture_bias = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let mut config = SimulationConfig::default();
        config.width = 9;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn test_normalize_snaps_iterations() {
        let mut config = SimulationConfig::default();
        config.erosion.iterations = 54_321;
        config.normalize();
        assert_eq!(config.erosion.iterations, 50_000);
    }
}
