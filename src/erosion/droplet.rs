//! Droplet hydraulic erosion.
//!
//! Walks independent water droplets downhill across the heightfield. A droplet
//! picks up sediment where the surface is steep and drops it where it runs out
//! of carry capacity, carving channels over many iterations. The walk does
//! constant work per step and allocates nothing inside the loop, so iteration
//! counts up to a million stay interactive on typical grids.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::HeightField;

/// Steps a droplet lives before it evaporates.
const DROPLET_LIFETIME: u32 = 30;
/// Per-component cap applied to the bilinear gradient.
const GRADIENT_CLAMP: f32 = 10.0;
/// Floor for the gradient magnitude so the step direction stays finite.
const MIN_GRADIENT_MAGNITUDE: f32 = 1e-6;
/// Scales velocity * water * slope into carry capacity.
const CAPACITY_FACTOR: f32 = 0.1;
/// Fraction of excess sediment dropped per step.
const DEPOSIT_RATE: f32 = 0.3;
/// Fraction of spare capacity converted to erosion per step.
const ERODE_RATE: f32 = 0.3;
/// A cell never loses more than this fraction of its height in one step.
const MAX_ERODE_FRACTION: f32 = 0.99;
/// Velocity lost to friction per step.
const FRICTION: f32 = 0.1;
/// Water remaining after evaporation per step.
const EVAPORATION: f32 = 0.99;

/// Aggregate results of one erosion run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ErosionStats {
    /// Total material deposited across all droplets.
    pub total_deposited: f64,
    /// Total material removed across all droplets.
    pub total_eroded: f64,
    /// Wall-clock time the run took.
    pub duration: Duration,
}

/// Runs droplet erosion over the heightfield.
///
/// The RNG drives droplet spawn positions and is injected so callers control
/// reproducibility: the pipeline seeds a ChaCha8 generator from config, tests
/// can pass any seeded generator. Totals accumulate in f64 because a full run
/// sums millions of small amounts.
///
/// # Arguments
/// * `field` - Heightfield to erode in place
/// * `iterations` - Number of droplets to simulate
/// * `initial_velocity` - Velocity each droplet starts with
/// * `rng` - Source of droplet spawn positions
pub fn erode<R: Rng>(
    field: &mut HeightField,
    iterations: u32,
    initial_velocity: f32,
    rng: &mut R,
) -> ErosionStats {
    let start = Instant::now();
    let width = field.width;
    let depth = field.depth;
    let mut stats = ErosionStats::default();

    if width == 0 || depth == 0 {
        // Zero-sized field: nowhere to spawn.
        stats.duration = start.elapsed();
        return stats;
    }

    for _ in 0..iterations {
        let mut x = rng.random_range(0..width) as f32;
        let mut z = rng.random_range(0..depth) as f32;
        let mut velocity = initial_velocity;
        let mut sediment = 0.0f32;
        let mut water = 1.0f32;

        for _ in 0..DROPLET_LIFETIME {
            let (gx, gz) = gradient_at(field, x, z);
            let slope = (gx * gx + gz * gz).sqrt();
            let magnitude = slope.max(MIN_GRADIENT_MAGNITUDE);

            if gx == 0.0 && gz == 0.0 {
                // Flat cell or border: nowhere to flow.
                break;
            }

            // One unit step downhill.
            x -= gx / magnitude;
            z -= gz / magnitude;
            if x < 0.0 || x >= width as f32 || z < 0.0 || z >= depth as f32 {
                // Droplet ran off the map.
                break;
            }

            let cx = x as u32;
            let cz = z as u32;
            let capacity = velocity * water * slope * CAPACITY_FACTOR;
            let height = field.get(cx, cz);

            if sediment > capacity || height < 0.0 {
                let deposit = ((sediment - capacity) * DEPOSIT_RATE).max(0.0);
                field.set(cx, cz, height + deposit);
                sediment -= deposit;
                stats.total_deposited += deposit as f64;
            } else {
                let eroded = ((capacity - sediment) * ERODE_RATE).min(height * MAX_ERODE_FRACTION);
                field.set(cx, cz, height - eroded);
                sediment += eroded;
                stats.total_eroded += eroded as f64;
            }

            velocity = (velocity + slope - FRICTION).max(0.0);
            water *= EVAPORATION;
        }
    }

    stats.duration = start.elapsed();
    stats
}

/// Bilinear height gradient at a continuous position.
///
/// Positions on the outermost row/column (or outside the grid) report a zero
/// gradient, which terminates the droplet before any out-of-bounds read.
#[inline]
fn gradient_at(field: &HeightField, x: f32, z: f32) -> (f32, f32) {
    let xi = x as i32;
    let zi = z as i32;
    if xi < 0 || xi >= field.width as i32 - 1 || zi < 0 || zi >= field.depth as i32 - 1 {
        return (0.0, 0.0);
    }

    let xf = x - xi as f32;
    let zf = z - zi as f32;
    let (xi, zi) = (xi as u32, zi as u32);

    let h00 = field.get(xi, zi);
    let h10 = field.get(xi + 1, zi);
    let h01 = field.get(xi, zi + 1);
    let h11 = field.get(xi + 1, zi + 1);

    let gx = (h10 - h00) * (1.0 - zf) + (h11 - h01) * zf;
    let gz = (h01 - h00) * (1.0 - xf) + (h11 - h10) * xf;

    (
        gx.clamp(-GRADIENT_CLAMP, GRADIENT_CLAMP),
        gz.clamp(-GRADIENT_CLAMP, GRADIENT_CLAMP),
    )
}
