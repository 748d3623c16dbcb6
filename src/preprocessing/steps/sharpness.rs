use super::blend_channel;
use crate::error::OcrError;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::filter::filter3x3;

/// 3x3 smoothing weights, normalized by their sum
const SMOOTH_WEIGHTS: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];
const SMOOTH_DIVISOR: f32 = 13.0;

/// Push every pixel away from a smoothed copy of the image by `factor`.
/// Factor 1.0 returns the image unchanged; the one-pixel border is kept as is.
pub fn apply(image: DynamicImage, factor: f32) -> Result<DynamicImage, OcrError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(OcrError::PreprocessingError(format!(
            "Invalid sharpness factor: {}",
            factor
        )));
    }

    let rgb = image.into_rgb8();
    let smooth = smooth(&rgb);
    tracing::debug!(factor, "Enhancing sharpness");

    let out = RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let Rgb(orig) = *rgb.get_pixel(x, y);
        let Rgb(soft) = *smooth.get_pixel(x, y);
        Rgb([
            blend_channel(soft[0] as f32, orig[0], factor),
            blend_channel(soft[1] as f32, orig[1], factor),
            blend_channel(soft[2] as f32, orig[2], factor),
        ])
    });

    Ok(DynamicImage::ImageRgb8(out))
}

/// Smoothed copy of `img`; border pixels are copied unchanged
fn smooth(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    if width < 3 || height < 3 {
        return img.clone();
    }

    let kernel = SMOOTH_WEIGHTS.map(|w| w / SMOOTH_DIVISOR);
    let blurred = filter3x3::<_, f32, f32>(img, &kernel);

    RgbImage::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            *img.get_pixel(x, y)
        } else {
            let Rgb(channels) = *blurred.get_pixel(x, y);
            Rgb(channels.map(|v| v.round().clamp(0.0, 255.0) as u8))
        }
    })
}
