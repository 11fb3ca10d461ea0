//! Erosion configuration.

use serde::{Deserialize, Serialize};

/// Iteration counts snap to multiples of this step.
pub const ITERATION_STEP: u32 = 10_000;

/// Parameters for droplet hydraulic erosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErosionConfig {
    /// Whether the erosion pass runs at all.
    pub enabled: bool,
    /// Number of droplets to simulate (10 000 - 1 000 000, in 10 000 steps).
    pub iterations: u32,
    /// Velocity each droplet starts with (0.0-3.0).
    pub initial_velocity: f32,
    /// Seed for the droplet spawn/walk RNG.
    pub seed: u64,
}

impl Default for ErosionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 50_000,
            initial_velocity: 1.0,
            seed: 42,
        }
    }
}

impl ErosionConfig {
    /// Returns `iterations` rounded to the nearest multiple of 10 000
    /// (half-up). Counts near `u32::MAX` saturate instead of wrapping.
    pub fn snapped_iterations(&self) -> u32 {
        self.iterations.saturating_add(ITERATION_STEP / 2) / ITERATION_STEP * ITERATION_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ErosionConfig::default();
        assert!(config.enabled);
        assert_eq!(config.iterations, 50_000);
        assert_eq!(config.initial_velocity, 1.0);
    }

    #[test]
    fn test_iteration_snapping() {
        let snap = |iterations| ErosionConfig {
            iterations,
            ..Default::default()
        }
        .snapped_iterations();

        assert_eq!(snap(10_000), 10_000);
        assert_eq!(snap(12_345), 10_000);
        assert_eq!(snap(15_000), 20_000);
        assert_eq!(snap(987_654), 990_000);
        assert_eq!(snap(1_000_000), 1_000_000);
        assert_eq!(snap(0), 0);
        // Saturates at the integer limit instead of wrapping.
        assert_eq!(snap(u32::MAX), 4_294_960_000);
    }
}
