use crate::error::OcrError;
use image::DynamicImage;
use serde::Serialize;

/// Four corner points of a detected text region, in detector order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub corners: [[f32; 2]; 4],
}

impl BoundingBox {
    /// Axis-aligned box, corners clockwise from the top left
    #[cfg(test)]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            corners: [[left, top], [right, top], [right, bottom], [left, bottom]],
        }
    }

    pub fn top_left(&self) -> (i32, i32) {
        let [x, y] = self.corners[0];
        (x as i32, y as i32)
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        let [x, y] = self.corners[2];
        (x as i32, y as i32)
    }
}

/// A recognized text fragment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub text: String,
    pub confidence: f32,
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Languages the recognition model can read
    fn supported_languages(&self) -> Vec<String>;

    /// Whether inference runs on a GPU
    fn uses_gpu(&self) -> bool;

    /// Detect and recognize text regions, in reading order
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError>;
}
