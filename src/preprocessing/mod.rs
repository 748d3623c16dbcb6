//! Image enhancement ahead of text recognition
//!
//! Normalizes the color mode and boosts contrast and sharpness, then writes
//! the result next to the source image.

pub mod pipeline;
pub mod processor;
pub mod steps;

pub use pipeline::{Pipeline, CONTRAST_FACTOR, SHARPNESS_FACTOR};
pub use processor::ImageProcessor;
