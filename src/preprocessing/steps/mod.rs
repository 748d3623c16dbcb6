//! Individual enhancement steps

pub mod contrast;
pub mod rgb;
pub mod sharpness;

/// Interpolate from `degenerate` toward `value` by `factor`.
///
/// Factors above 1.0 extrapolate away from the degenerate value; the result
/// is clamped to the channel range and truncated.
pub(crate) fn blend_channel(degenerate: f32, value: u8, factor: f32) -> u8 {
    let out = degenerate + factor * (value as f32 - degenerate);
    if out <= 0.0 {
        0
    } else if out >= 255.0 {
        255
    } else {
        out as u8
    }
}
