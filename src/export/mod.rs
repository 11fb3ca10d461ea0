//! Export module for saving terrain data as images.
//!
//! Supports 16-bit PNG heightmaps and scalar fields for universal
//! compatibility, plus RGB normal and biome preview maps.

mod biome_map;
mod normal_map;
mod png;

pub use biome_map::{BiomeMapError, BiomeMapOptions, export_biome_map_png};
pub use normal_map::{NormalMapError, NormalMapOptions, export_normal_map_png};
pub use png::{PngExportError, PngExportOptions, export_heightmap_png, export_scalar_png};
