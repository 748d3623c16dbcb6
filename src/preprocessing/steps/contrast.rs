use super::blend_channel;
use crate::error::OcrError;
use image::{DynamicImage, Rgb, RgbImage};

/// Scale every channel away from the mean luminance by `factor`.
/// Factor 1.0 returns the image unchanged.
pub fn apply(image: DynamicImage, factor: f32) -> Result<DynamicImage, OcrError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(OcrError::PreprocessingError(format!(
            "Invalid contrast factor: {}",
            factor
        )));
    }

    let rgb = image.into_rgb8();
    let mean = mean_luminance(&rgb);
    tracing::debug!(mean, factor, "Enhancing contrast");

    let mut out = rgb;
    for pixel in out.pixels_mut() {
        let Rgb([r, g, b]) = *pixel;
        *pixel = Rgb([
            blend_channel(mean, r, factor),
            blend_channel(mean, g, factor),
            blend_channel(mean, b, factor),
        ]);
    }

    Ok(DynamicImage::ImageRgb8(out))
}

/// ITU-R 601 luma in 16-bit fixed point
fn luma(pixel: &Rgb<u8>) -> u32 {
    let [r, g, b] = pixel.0;
    (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16
}

/// Mean luma, rounded to the nearest integer
fn mean_luminance(img: &RgbImage) -> f32 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0.0;
    }

    let sum: u64 = img.pixels().map(|p| luma(p) as u64).sum();
    (sum as f64 / count as f64 + 0.5).floor() as f32
}
