use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to load image {}: {message}", path.display())]
    ImageLoad { path: PathBuf, message: String },

    #[error("Failed to save image {}: {message}", path.display())]
    ImageSave { path: PathBuf, message: String },

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Failed to process image: {0}")]
    ProcessingError(String),
}

impl OcrError {
    pub fn load(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        OcrError::ImageLoad {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn save(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        OcrError::ImageSave {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
