//! Text recognition around a pre-trained OCR engine

use crate::engine::{Detection, OcrEngine};
use crate::error::OcrError;
use crate::preprocessing::processor::load_image;
use crate::preprocessing::ImageProcessor;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a successful recognition run
#[derive(Debug, Clone, Serialize)]
pub struct Recognition {
    /// Detected fragments joined by single spaces, in detection order
    pub text: String,
    pub detections: Vec<Detection>,
    pub preprocessed_path: PathBuf,
}

/// Recognizes handwritten text with one engine instance reused across calls
pub struct TextRecognizer {
    languages: Vec<String>,
    has_gpu: bool,
    processor: ImageProcessor,
    engine: Arc<dyn OcrEngine>,
}

impl TextRecognizer {
    pub fn new(
        languages: Vec<String>,
        processor: ImageProcessor,
        engine: Arc<dyn OcrEngine>,
    ) -> Self {
        let supported = engine.supported_languages();
        for lang in languages.iter().filter(|lang| !supported.contains(lang)) {
            tracing::warn!(
                language = %lang,
                engine = engine.name(),
                supported = ?supported,
                "Language not supported by engine, recognition may be poor"
            );
        }

        Self {
            languages,
            has_gpu: engine.uses_gpu(),
            processor,
            engine,
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn has_gpu(&self) -> bool {
        self.has_gpu
    }

    /// Enhance the image, run the engine on it, and join the detected text.
    ///
    /// Any failure is logged and collapsed into `None`.
    pub fn recognize_text(&self, path: &Path) -> Option<Recognition> {
        match self.try_recognize_text(path) {
            Ok(recognition) => Some(recognition),
            Err(e) => {
                tracing::error!("Error processing image: {}", e);
                None
            }
        }
    }

    /// Same flow as [`recognize_text`](Self::recognize_text), keeping the error
    pub fn try_recognize_text(&self, path: &Path) -> Result<Recognition, OcrError> {
        let preprocessed_path = self.processor.enhance_image(path)?;

        let image = load_image(&preprocessed_path)?;
        let detections = self.engine.detect(&image)?;

        let text = join_fragments(&detections);
        tracing::info!(
            fragments = detections.len(),
            chars = text.len(),
            "Recognition complete"
        );

        Ok(Recognition {
            text,
            detections,
            preprocessed_path,
        })
    }

    /// Draw the detected regions onto the image at `path`
    pub fn visualize_detection(
        &self,
        path: &Path,
        detections: &[Detection],
    ) -> Result<PathBuf, OcrError> {
        self.processor.visualize_results(path, detections)
    }
}

fn join_fragments(detections: &[Detection]) -> String {
    detections
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
