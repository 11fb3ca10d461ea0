//! Terrain data structures and generation.
//!
//! Provides the HeightField elevation grid, fractal heightmap generation,
//! surface normal computation, and the Terrain aggregate the pipeline fills.

mod heightfield;
mod heightmap;
mod map;
mod normals;

pub use heightfield::HeightField;
pub use heightmap::generate_heightmap;
pub use map::{Terrain, TerrainSnapshot};
pub use normals::{NormalField, compute_normals};
