//! Seeded permutation-table gradient noise.

/// Classic 2D gradient noise over a seeded permutation table.
///
/// All arithmetic is plain scalar f32 (floor, multiply, add), so a given seed
/// produces the same bit pattern on every platform, in every process. This is
/// what makes whole-terrain reproducibility possible further up the stack.
#[derive(Debug, Clone)]
pub struct Perlin2 {
    /// 256-entry permutation duplicated into the upper half so corner
    /// lookups never need a wrap.
    perm: [u8; 512],
}

impl Perlin2 {
    /// Creates a generator whose permutation table is shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        let mut next = move || {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        // Fisher-Yates shuffle driven by the seeded generator
        for i in (1..256).rev() {
            let j = (next() as usize) % (i + 1);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }

        Self { perm }
    }

    /// Samples the noise at `(x, y)`.
    ///
    /// Returns a value in [-1, 1]. At integer lattice points every corner
    /// gradient dots with a zero offset, so the result is exactly 0.0.
    pub fn noise(&self, x: f32, y: f32) -> f32 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let x = x - xf;
        let y = y - yf;

        let u = fade(x);
        let v = fade(y);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = lerp(grad(aa, x, y), grad(ba, x - 1.0, y), u);
        let x2 = lerp(grad(ab, x, y - 1.0), grad(bb, x - 1.0, y - 1.0), u);
        lerp(x1, x2, v)
    }
}

/// Smootherstep fade curve: 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Dots the hashed corner gradient with the distance vector.
#[inline]
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 0xF;
    let u = if h < 8 { x } else { y };
    let v = if h < 8 { y } else { x };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_determinism() {
        let a = Perlin2::new(1234);
        let b = Perlin2::new(1234);

        for i in 0..50 {
            let x = i as f32 * 0.173 - 4.0;
            let y = i as f32 * 0.311 - 2.0;
            assert_eq!(a.noise(x, y), b.noise(x, y), "Same seed must give identical samples");
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = Perlin2::new(1);
        let b = Perlin2::new(2);

        let differs = (0..50).any(|i| {
            let x = i as f32 * 0.37 + 0.5;
            a.noise(x, x * 0.5) != b.noise(x, x * 0.5)
        });
        assert!(differs, "Different seeds should produce different noise");
    }

    #[test]
    fn test_noise_range() {
        let noise = Perlin2::new(42);
        for iy in -30..30 {
            for ix in -30..30 {
                let v = noise.noise(ix as f32 * 0.13, iy as f32 * 0.17);
                assert!(
                    v >= -1.0 && v <= 1.0,
                    "Sample {} at ({}, {}) out of range",
                    v,
                    ix,
                    iy
                );
            }
        }
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let noise = Perlin2::new(7);
        for y in -4..=4 {
            for x in -4..=4 {
                assert_eq!(noise.noise(x as f32, y as f32), 0.0);
            }
        }
    }

    #[test]
    fn test_negative_coordinates_wrap() {
        let noise = Perlin2::new(99);
        // Just exercise the negative-floor path; values must stay in range.
        let v = noise.noise(-3.7, -0.2);
        assert!(v.is_finite() && v.abs() <= 1.0);
    }
}
