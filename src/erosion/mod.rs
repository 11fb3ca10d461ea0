//! Droplet hydraulic erosion.
//!
//! Sequential particle simulation that sculpts an existing heightmap. The
//! droplet walk itself lives in `droplet`; tunable parameters and the
//! iteration snapping rule live in `config`.

mod config;
mod droplet;

pub use config::{ErosionConfig, ITERATION_STEP};
pub use droplet::{ErosionStats, erode};
