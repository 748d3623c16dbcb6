//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads the pre-trained models automatically on first use.

use crate::config::Config;
use crate::engine::{BoundingBox, Detection, OcrEngine};
use crate::error::OcrError;
use image::DynamicImage;
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams, TextItem};
use rten::Model;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Load the detection and recognition models, downloading them if needed
    pub fn new(config: &Config) -> Result<Self, OcrError> {
        let model_dir = config.model_dir.clone().unwrap_or_else(default_model_dir);

        let detection_model_path =
            ensure_model_downloaded(&model_dir, DETECTION_MODEL_URL, DETECTION_MODEL_FILENAME)?;
        let recognition_model_path = ensure_model_downloaded(
            &model_dir,
            RECOGNITION_MODEL_URL,
            RECOGNITION_MODEL_FILENAME,
        )?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            OcrError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            OcrError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl OcrEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn supported_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["en".to_string()]
    }

    fn uses_gpu(&self) -> bool {
        // rten inference is CPU-only
        false
    }

    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, OcrError> {
        // HWC RGB bytes, which is what ImageSource::from_bytes expects
        let rgb_img = image.to_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            OcrError::ProcessingError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to detect words: {}", e)))?;
        tracing::debug!(word_count = word_rects.len(), "Words detected");

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);
        tracing::debug!(line_count = line_rects.len(), "Text lines found");

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        let detections: Vec<Detection> = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .filter_map(|line| {
                let text = line
                    .words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                if text.trim().is_empty() {
                    return None;
                }

                let corners = line.rotated_rect().corners().map(|p| [p.x, p.y]);
                let confidence = calculate_confidence(&text);
                Some(Detection {
                    bbox: BoundingBox { corners },
                    text,
                    confidence,
                })
            })
            .collect();

        tracing::debug!(detections = detections.len(), "Recognition complete");

        Ok(detections)
    }
}

// ============================================================================
// Line confidence
// ============================================================================

/// Score one recognized line of handwriting in `[0, 1]`.
///
/// ocrs reports no per-character scores. Pen strokes the model misreads
/// tend to come back as symbols, lone characters or long runs of one glyph,
/// so each line is scored on those traits. Short lines such as a single
/// word are not penalized for their length.
fn calculate_confidence(line: &str) -> f32 {
    let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    if glyphs.is_empty() {
        return 0.0;
    }

    let confidence = 0.4 * glyph_legibility(&glyphs)
        + 0.4 * word_shape(line)
        + 0.2 * stutter_score(&glyphs);

    confidence.clamp(0.0, 1.0)
}

/// Share of glyphs that are letters, digits or ASCII punctuation, squared.
/// A line with no letter or digit at all is mostly stray marks.
fn glyph_legibility(glyphs: &[char]) -> f32 {
    let readable = glyphs
        .iter()
        .filter(|c| c.is_alphanumeric() || c.is_ascii_punctuation())
        .count();
    let ratio = readable as f32 / glyphs.len() as f32;

    let has_alphanumeric = glyphs.iter().any(|c| c.is_alphanumeric());
    let score = ratio * ratio;
    if has_alphanumeric {
        score
    } else {
        score * 0.3
    }
}

/// Share of words that look written: mostly alphanumeric, and either longer
/// than one character or a lone letter/digit. Lines made mostly of
/// one-character words are discounted.
fn word_shape(line: &str) -> f32 {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let plausible = words
        .iter()
        .filter(|word| {
            let total = word.chars().count();
            let alphanumeric = word.chars().filter(|c| c.is_alphanumeric()).count();
            alphanumeric * 2 >= total && alphanumeric > 0
        })
        .count();
    let score = plausible as f32 / words.len() as f32;

    if words.len() < 3 {
        return score;
    }
    let single = words.iter().filter(|word| word.chars().count() == 1).count();
    let single_ratio = single as f32 / words.len() as f32;
    score * (1.0 - 0.8 * single_ratio)
}

/// Longest run of one repeated glyph. Doubled letters are normal.
fn stutter_score(glyphs: &[char]) -> f32 {
    let mut longest = 1;
    let mut current = 1;
    for pair in glyphs.windows(2) {
        if pair[0] == pair[1] {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
    }

    match longest {
        1..=2 => 1.0,
        3 => 0.8,
        4..=5 => 0.5,
        _ => 0.2,
    }
}

// ============================================================================
// Model files
// ============================================================================

fn default_model_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("handwriting-ocr")
}

/// Ensure model is present in `dir` and return its path
fn ensure_model_downloaded(dir: &Path, url: &str, filename: &str) -> Result<PathBuf, OcrError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        OcrError::InitializationError(format!(
            "Failed to create model directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let model_path = dir.join(filename);

    if !model_path.exists() {
        tracing::info!("Downloading {} (this may take a moment)...", filename);
        download_file(url, &model_path)?;
        tracing::info!("Downloaded {} to {:?}", filename, model_path);
    } else {
        tracing::info!("Using cached model from {:?}", model_path);
    }

    Ok(model_path)
}

/// Download a file from URL to path using ureq
fn download_file(url: &str, path: &Path) -> Result<(), OcrError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| OcrError::InitializationError(format!("Failed to download model: {}", e)))?;

    let buffer = response.into_body().read_to_vec().map_err(|e| {
        OcrError::InitializationError(format!("Failed to read response body: {}", e))
    })?;

    // The final path only ever holds a complete model
    let partial_path = path.with_extension("rten.part");
    let mut file = File::create(&partial_path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to create model file: {}", e))
    })?;
    file.write_all(&buffer)
        .map_err(|e| OcrError::InitializationError(format!("Failed to write model file: {}", e)))?;

    std::fs::rename(&partial_path, path).map_err(|e| {
        OcrError::InitializationError(format!("Failed to move model into place: {}", e))
    })?;

    Ok(())
}
