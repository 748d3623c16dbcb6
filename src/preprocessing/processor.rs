use super::Pipeline;
use crate::engine::Detection;
use crate::error::OcrError;
use crate::render;
use image::{DynamicImage, ImageReader};
use std::path::{Path, PathBuf};

/// Prefix of the enhanced copy written next to the source image
pub const PREPROCESSED_PREFIX: &str = "preprocessed_";

/// Image operations around text recognition: enhancement before the
/// engine runs, and rendering of its detections afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageProcessor {
    pipeline: Pipeline,
}

impl ImageProcessor {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Enhance the image at `path` and save it as a sibling
    /// `preprocessed_<name>` file. Returns the saved path.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn enhance_image(&self, path: &Path) -> Result<PathBuf, OcrError> {
        let img = load_image(path)?;
        tracing::debug!(mode = ?img.color(), "Original image mode");

        let report = self.pipeline.process(img)?;
        tracing::debug!(
            total_ms = report.total_time_ms,
            steps = ?report.steps,
            "Enhancement complete"
        );

        let output = preprocessed_path(path);
        report
            .image
            .save(&output)
            .map_err(|e| OcrError::save(&output, e))?;

        tracing::debug!(mode = ?report.image.color(), "Final saved image mode");
        tracing::info!("Preprocessed image saved to {}", output.display());

        Ok(output)
    }

    /// Draw the detected regions onto the image at `path`
    pub fn visualize_results(
        &self,
        path: &Path,
        detections: &[Detection],
    ) -> Result<PathBuf, OcrError> {
        render::draw_detections(path, detections)
    }
}

/// `<dir>/preprocessed_<basename>` for an input at `<dir>/<basename>`
pub fn preprocessed_path(path: &Path) -> PathBuf {
    derived_path(path, PREPROCESSED_PREFIX)
}

/// Open an image, picking the decoder from the file's leading bytes rather
/// than its extension
pub fn load_image(path: &Path) -> Result<DynamicImage, OcrError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| OcrError::load(path, e))?
        .decode()
        .map_err(|e| OcrError::load(path, e))
}

/// Path of a file derived from `path`: same directory, basename prefixed
pub fn derived_path(path: &Path, prefix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", prefix, name))
}
