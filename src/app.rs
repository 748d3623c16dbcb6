use crate::config::Config;
use crate::engines;
use crate::preprocessing::{ImageProcessor, Pipeline};
use crate::recognizer::{Recognition, TextRecognizer};

const RULE_WIDTH: usize = 30;

/// Run the recognition flow for the configured image
pub fn run(config: Config) -> anyhow::Result<()> {
    let processor = ImageProcessor::new(Pipeline::new(config.contrast, config.sharpness));

    if config.enhance_only {
        let path = processor.enhance_image(&config.image)?;
        println!("{}", path.display());
        return Ok(());
    }

    let engine = engines::create_engine(&config)?;
    let recognizer = TextRecognizer::new(config.languages.clone(), processor, engine);
    tracing::info!(
        languages = ?recognizer.languages(),
        gpu = recognizer.has_gpu(),
        "Text recognizer ready"
    );

    let recognition = match recognizer.recognize_text(&config.image) {
        Some(recognition) if !recognition.text.is_empty() => recognition,
        _ => anyhow::bail!("Failed to extract text from the image."),
    };

    print_recognition(&recognition, config.json)?;

    if config.visualize {
        let overlay = recognizer
            .visualize_detection(&recognition.preprocessed_path, &recognition.detections)?;
        if !config.json {
            println!("Detections drawn to {}", overlay.display());
        }
    }

    Ok(())
}

fn print_recognition(recognition: &Recognition, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recognition)?);
        return Ok(());
    }

    let rule = "-".repeat(RULE_WIDTH);
    println!("\nExtracted Text:");
    println!("{}", rule);
    println!("{}", recognition.text);
    println!("{}", rule);
    Ok(())
}
