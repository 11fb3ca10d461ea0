//! Surface normals from height gradients.

use glam::Vec3;
use rayon::prelude::*;

use super::heightfield::HeightField;

/// Per-cell unit surface normals, index-aligned with the source heightfield.
#[derive(Debug, Clone)]
pub struct NormalField {
    /// Grid width (x axis) in cells.
    pub width: u32,
    /// Grid depth (z axis) in cells.
    pub depth: u32,
    /// Unit normals stored in row-major order.
    pub normals: Vec<Vec3>,
}

impl NormalField {
    /// Returns the normal at `(x, z)`.
    ///
    /// # Panics
    /// Panics if x or z is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, z: u32) -> Vec3 {
        debug_assert!(x < self.width && z < self.depth);
        self.normals[(z * self.width + x) as usize]
    }
}

/// Computes unit surface normals for every cell of a heightfield.
///
/// Gradients use central differences in the interior and one-sided
/// differences on the edges; an axis of length 1 has gradient 0. Each normal
/// is `normalize(vec3(-dh/dx, 1, -dh/dz))` - the fixed +1 up component means
/// the result is never the zero vector for finite input, and degenerate
/// (non-finite) cells fall back to straight up, so every output is unit length.
pub fn compute_normals(heights: &HeightField) -> NormalField {
    let width = heights.width;
    let depth = heights.depth;
    let mut normals = vec![Vec3::Y; heights.cell_count()];
    if width == 0 || depth == 0 {
        return NormalField {
            width,
            depth,
            normals,
        };
    }

    normals
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(z, row)| {
            let z = z as u32;
            for (x, normal) in row.iter_mut().enumerate() {
                let x = x as u32;
                let dhdx = gradient_x(heights, x, z);
                let dhdz = gradient_z(heights, x, z);
                let n = Vec3::new(-dhdx, 1.0, -dhdz).normalize_or_zero();
                *normal = if n == Vec3::ZERO { Vec3::Y } else { n };
            }
        });

    NormalField {
        width,
        depth,
        normals,
    }
}

fn gradient_x(heights: &HeightField, x: u32, z: u32) -> f32 {
    let w = heights.width;
    if w < 2 {
        0.0
    } else if x == 0 {
        heights.get(1, z) - heights.get(0, z)
    } else if x == w - 1 {
        heights.get(w - 1, z) - heights.get(w - 2, z)
    } else {
        (heights.get(x + 1, z) - heights.get(x - 1, z)) * 0.5
    }
}

fn gradient_z(heights: &HeightField, x: u32, z: u32) -> f32 {
    let d = heights.depth;
    if d < 2 {
        0.0
    } else if z == 0 {
        heights.get(x, 1) - heights.get(x, 0)
    } else if z == d - 1 {
        heights.get(x, d - 1) - heights.get(x, d - 2)
    } else {
        (heights.get(x, z + 1) - heights.get(x, z - 1)) * 0.5
    }
}
