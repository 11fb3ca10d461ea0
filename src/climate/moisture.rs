//! Moisture model.

/// Compute normalized moisture for a cell from a raw noise sample, the cell's
/// height, and the configured bias.
///
/// `raw` is an fBm sample in roughly [-1, 1] and `height` a terrain height in
/// the same range. The bias enters squared, so the knob responds gently near
/// zero and steeply near one. The result is always in [0, 1].
pub(crate) fn moisture_at(raw: f32, height: f32, bias: f32) -> f32 {
    // Altitude drying: higher cells shed up to 0.2 of moisture.
    let abs_height = (height + 1.0) / 2.0;

    (raw / 2.0 + bias * bias - abs_height * 0.2 + 0.05).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moisture_in_unit_range() {
        for raw in [-1.0f32, -0.5, 0.0, 0.5, 1.0] {
            for height in [-1.0f32, 0.0, 1.0] {
                for bias in [0.0f32, 0.5, 1.0] {
                    let m = moisture_at(raw, height, bias);
                    assert!((0.0..=1.0).contains(&m), "m = {m} out of range");
                }
            }
        }
    }

    #[test]
    fn test_elevation_dries() {
        let low = moisture_at(0.3, -1.0, 0.6);
        let high = moisture_at(0.3, 1.0, 0.6);
        assert!(high < low);
    }

    #[test]
    fn test_bias_is_squared() {
        // At bias 1 the offset is a full +1.0; at bias 0.5 only +0.25.
        let strong = moisture_at(0.0, 0.0, 1.0);
        let weak = moisture_at(0.0, 0.0, 0.5);
        assert!((strong - weak - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_dry_extreme_clamps_to_zero() {
        assert_eq!(moisture_at(-1.0, 1.0, 0.0), 0.0);
    }
}
