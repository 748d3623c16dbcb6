use crate::error::OcrError;
use image::DynamicImage;

/// Ensure the image is 8-bit RGB; alpha is dropped
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    if let DynamicImage::ImageRgb8(_) = image {
        return Ok(image);
    }

    tracing::debug!(from = ?image.color(), "Converting to RGB");
    Ok(DynamicImage::ImageRgb8(image.into_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GrayImage, Luma, Rgba, RgbaImage};

    #[test]
    fn test_rgb_converts_grayscale() {
        let img = GrayImage::from_pixel(8, 4, Luma([90]));
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();

        assert_eq!(result.color(), ColorType::Rgb8);
        assert_eq!(result.to_rgb8().get_pixel(3, 2).0, [90, 90, 90]);
    }

    #[test]
    fn test_rgb_drops_alpha() {
        let img = RgbaImage::from_pixel(5, 5, Rgba([10, 20, 30, 0]));
        let result = apply(DynamicImage::ImageRgba8(img)).unwrap();

        assert_eq!(result.color(), ColorType::Rgb8);
        assert_eq!(result.to_rgb8().get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_rgb_preserves_dimensions() {
        let img = GrayImage::new(100, 50);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 50);
    }
}
