use crate::error::OcrError;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Contrast boost applied before recognition
pub const CONTRAST_FACTOR: f32 = 1.5;
/// Sharpness boost applied before recognition
pub const SHARPNESS_FACTOR: f32 = 2.0;

/// Timing information for a single enhancement step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of enhancement including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct EnhanceReport {
    /// Enhanced image (not serialized)
    #[serde(skip)]
    pub image: DynamicImage,
    /// Total enhancement time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Enhancement pipeline: RGB conversion, contrast, sharpness
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    contrast: f32,
    sharpness: f32,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(CONTRAST_FACTOR, SHARPNESS_FACTOR)
    }
}

impl Pipeline {
    pub fn new(contrast: f32, sharpness: f32) -> Self {
        Self {
            contrast,
            sharpness,
        }
    }

    /// Enhance an image; the output is always RGB8 with the input's dimensions
    pub fn process(&self, image: DynamicImage) -> Result<EnhanceReport, OcrError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let mut img = image;
        img = self.run_step("rgb", img, &mut steps_timing, steps::rgb::apply)?;
        img = self.run_step("contrast", img, &mut steps_timing, |img| {
            steps::contrast::apply(img, self.contrast)
        })?;
        img = self.run_step("sharpness", img, &mut steps_timing, |img| {
            steps::sharpness::apply(img, self.sharpness)
        })?;

        Ok(EnhanceReport {
            image: img,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: DynamicImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<DynamicImage, OcrError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, OcrError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}
