//! Rendering of detection results for inspection

use crate::engine::Detection;
use crate::error::OcrError;
use crate::preprocessing::processor::{derived_path, load_image};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::path::{Path, PathBuf};

/// Prefix of the annotated copy written next to the rendered image
pub const DETECTED_PREFIX: &str = "detected_";

const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Stroke width in pixels
const BOX_THICKNESS: u32 = 2;

/// Draw each detection's box onto the image at `path` and save the result
/// as a sibling `detected_<name>` file. Returns the saved path.
///
/// Only the boxes are drawn: with no font available, each box's text and
/// confidence are logged next to its corner coordinates instead of being
/// painted as a label.
pub fn draw_detections(path: &Path, detections: &[Detection]) -> Result<PathBuf, OcrError> {
    let mut canvas = load_image(path)?.into_rgb8();

    for detection in detections {
        draw_box(&mut canvas, &detection.bbox.corners);
        tracing::info!(
            text = %detection.text,
            confidence = detection.confidence,
            top_left = ?detection.bbox.top_left(),
            bottom_right = ?detection.bbox.bottom_right(),
            "Detected text"
        );
    }

    let output = derived_path(path, DETECTED_PREFIX);
    canvas.save(&output).map_err(|e| OcrError::save(&output, e))?;
    tracing::info!(
        boxes = detections.len(),
        "Detection overlay saved to {}",
        output.display()
    );

    Ok(output)
}

/// Closed polygon through the four corners, stroked inward and downward
fn draw_box(canvas: &mut RgbImage, corners: &[[f32; 2]; 4]) {
    for offset in 0..BOX_THICKNESS {
        let d = offset as f32;
        for i in 0..corners.len() {
            let [x0, y0] = corners[i];
            let [x1, y1] = corners[(i + 1) % corners.len()];
            draw_line_segment_mut(canvas, (x0 + d, y0), (x1 + d, y1), BOX_COLOR);
            draw_line_segment_mut(canvas, (x0, y0 + d), (x1, y1 + d), BOX_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BoundingBox;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn blank_page(dir: &Path) -> PathBuf {
        let path = dir.join("page.png");
        RgbImage::from_pixel(40, 40, WHITE).save(&path).unwrap();
        path
    }

    #[test]
    fn test_draws_green_box_edges() {
        let dir = tempfile::tempdir().unwrap();
        let input = blank_page(dir.path());
        let detections = vec![Detection {
            bbox: BoundingBox::from_edges(5.0, 5.0, 30.0, 20.0),
            text: "hello".to_string(),
            confidence: 0.9,
        }];

        let output = draw_detections(&input, &detections).unwrap();
        assert_eq!(output, dir.path().join("detected_page.png"));

        let rendered = image::open(&output).unwrap().into_rgb8();
        assert_eq!(*rendered.get_pixel(5, 5), BOX_COLOR);
        assert_eq!(*rendered.get_pixel(17, 5), BOX_COLOR);
        assert_eq!(*rendered.get_pixel(17, 6), BOX_COLOR);
        assert_eq!(*rendered.get_pixel(30, 12), BOX_COLOR);
        assert_eq!(*rendered.get_pixel(17, 12), WHITE);
    }

    #[test]
    fn test_draws_on_png_with_jpg_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("page.jpg");
        RgbImage::from_pixel(40, 40, WHITE)
            .save_with_format(&input, image::ImageFormat::Png)
            .unwrap();
        let detections = vec![Detection {
            bbox: BoundingBox::from_edges(5.0, 5.0, 30.0, 20.0),
            text: "eggs".to_string(),
            confidence: 0.7,
        }];

        let output = draw_detections(&input, &detections).unwrap();

        assert_eq!(output, dir.path().join("detected_page.jpg"));
        let rendered = load_image(&output).unwrap();
        assert_eq!((rendered.width(), rendered.height()), (40, 40));
    }

    #[test]
    fn test_no_detections_copies_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = blank_page(dir.path());

        let output = draw_detections(&input, &[]).unwrap();

        let original = image::open(&input).unwrap().into_rgb8();
        let rendered = image::open(&output).unwrap().into_rgb8();
        assert_eq!(original, rendered);
    }

    #[test]
    fn test_box_outside_image_is_clipped() {
        let mut canvas = RgbImage::from_pixel(10, 10, WHITE);
        draw_box(&mut canvas, &BoundingBox::from_edges(-5.0, -5.0, 50.0, 50.0).corners);
        assert_eq!(*canvas.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_missing_image_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = draw_detections(&dir.path().join("nope.png"), &[]);
        assert!(matches!(result, Err(OcrError::ImageLoad { .. })));
    }
}
