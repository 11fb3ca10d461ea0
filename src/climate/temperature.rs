//! Temperature model.

/// Compute normalized temperature for a cell from a raw noise sample,
/// the cell's height, and the configured bias.
///
/// `raw` is an fBm sample in roughly [-1, 1] and `height` a terrain height in
/// the same range. The result is always in [0, 1].
pub(crate) fn temperature_at(raw: f32, height: f32, bias: f32) -> f32 {
    // Lift the noise band so mid-range samples land warm rather than neutral.
    let lifted = (raw + 1.05) / 2.0;

    // Altitude cooling: higher cells lose up to 20% of their warmth.
    let abs_height = (height + 1.0) / 2.0;
    let cooled = lifted * (1.0 - abs_height * 0.2);

    (cooled * bias).clamp(0.0, 1.0)
}
