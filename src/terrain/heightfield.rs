//! Row-major elevation grid.

use serde::{Deserialize, Serialize};

/// A width x depth grid of elevation samples in row-major order.
///
/// `values[z * width + x]` holds the height at `(x, z)`. Heights straight out
/// of generation are normalized fBm in [-1, 1]; erosion may push individual
/// cells outside that band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    /// Grid width (x axis) in cells.
    pub width: u32,
    /// Grid depth (z axis) in cells.
    pub depth: u32,
    /// Height values stored in row-major order.
    pub values: Vec<f32>,
}

impl HeightField {
    /// Creates a zero-filled field with the given dimensions.
    pub fn new(width: u32, depth: u32) -> Self {
        let size = (width as usize) * (depth as usize);
        Self {
            width,
            depth,
            values: vec![0.0; size],
        }
    }

    /// Returns the flat index of cell `(x, z)`.
    #[inline]
    pub fn index(&self, x: u32, z: u32) -> usize {
        (z * self.width + x) as usize
    }

    /// Returns the height at `(x, z)`.
    ///
    /// # Panics
    /// Panics if x or z is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, z: u32) -> f32 {
        debug_assert!(x < self.width && z < self.depth);
        self.values[(z * self.width + x) as usize]
    }

    /// Sets the height at `(x, z)`.
    ///
    /// # Panics
    /// Panics if x or z is out of bounds.
    #[inline]
    pub fn set(&mut self, x: u32, z: u32, height: f32) {
        debug_assert!(x < self.width && z < self.depth);
        self.values[(z * self.width + x) as usize] = height;
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.depth as usize)
    }

    /// Returns (min, max) over all heights.
    pub fn height_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &height in &self.values {
            min = min.min(height);
            max = max.max(height);
        }
        (min, max)
    }

    /// Returns true if every height is a finite number.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }

    /// Returns an iterator over all (x, z) cell coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width;
        let depth = self.depth;
        (0..depth).flat_map(move |z| (0..width).map(move |x| (x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = HeightField::new(100, 80);
        assert_eq!(field.width, 100);
        assert_eq!(field.depth, 80);
        assert_eq!(field.values.len(), 100 * 80);
        assert!(field.values.iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_get_set() {
        let mut field = HeightField::new(64, 64);
        field.set(10, 20, 0.5);
        assert_eq!(field.get(10, 20), 0.5);
        assert_eq!(field.index(10, 20), 20 * 64 + 10);
    }

    #[test]
    fn test_height_range() {
        let mut field = HeightField::new(32, 32);
        field.set(0, 0, -0.5);
        field.set(31, 31, 1.5);

        let (min, max) = field.height_range();
        assert_eq!(min, -0.5);
        assert_eq!(max, 1.5);
    }

    #[test]
    fn test_cells_iterator() {
        let field = HeightField::new(4, 4);
        let coords: Vec<_> = field.cells().collect();

        assert_eq!(coords.len(), 16);
        assert_eq!(coords[0], (0, 0));
        assert_eq!(coords[1], (1, 0));
        assert_eq!(coords[4], (0, 1));
        assert_eq!(coords[15], (3, 3));
    }

    #[test]
    fn test_is_finite() {
        let mut field = HeightField::new(8, 8);
        assert!(field.is_finite());
        field.set(3, 3, f32::NAN);
        assert!(!field.is_finite());
    }
}
