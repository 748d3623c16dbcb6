use crate::Args;
use std::path::PathBuf;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image: PathBuf,
    pub languages: Vec<String>,
    pub model_dir: Option<PathBuf>,
    pub contrast: f32,
    pub sharpness: f32,
    pub enhance_only: bool,
    pub visualize: bool,
    pub json: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let languages = args
            .languages
            .into_iter()
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty())
            .collect();

        Self {
            image: args.image,
            languages,
            model_dir: args.model_dir,
            contrast: args.contrast,
            sharpness: args.sharpness,
            enhance_only: args.enhance_only,
            visualize: !args.no_visualize,
            json: args.json,
        }
    }
}
