//! Climate configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration for climate field generation.
///
/// Both biases are [0, 1] knobs applied inside the temperature and moisture
/// formulas. `biome_overlay` only gates rendering/export of the biome map;
/// climate and biomes are always computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Whether exports/overlays should color terrain by biome.
    pub biome_overlay: bool,
    /// Scales the temperature field (0.0-1.0).
    pub temperature_bias: f32,
    /// Shifts the moisture field; enters the formula squared (0.0-1.0).
    pub moisture_bias: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            biome_overlay: true,
            temperature_bias: 0.8,
            moisture_bias: 0.6,
        }
    }
}
