use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod engine;
mod engines;
mod error;
mod preprocessing;
mod recognizer;
mod render;

#[derive(Parser, Debug)]
#[command(name = "handwriting-ocr")]
#[command(about = "Enhance an image and extract handwritten text from it")]
#[command(version)]
pub struct Args {
    /// Path to the image with handwritten text
    pub image: PathBuf,

    /// Comma-separated language codes for recognition (e.g., "en")
    #[arg(
        long,
        env = "HTR_LANGUAGES",
        default_value = "en",
        value_delimiter = ','
    )]
    pub languages: Vec<String>,

    /// Directory holding the detection and recognition models (downloaded if missing)
    #[arg(long, env = "HTR_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Contrast enhancement factor
    #[arg(long, default_value_t = preprocessing::CONTRAST_FACTOR)]
    pub contrast: f32,

    /// Sharpness enhancement factor
    #[arg(long, default_value_t = preprocessing::SHARPNESS_FACTOR)]
    pub sharpness: f32,

    /// Only write the preprocessed image, skip text recognition
    #[arg(long)]
    pub enhance_only: bool,

    /// Do not render detected boxes onto the image
    #[arg(long)]
    pub no_visualize: bool,

    /// Print the recognition result as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the extracted text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting handwriting-ocr v{}", env!("CARGO_PKG_VERSION"));

    app::run(config)
}
