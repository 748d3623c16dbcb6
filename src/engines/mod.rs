//! OCR engine implementations
//!
//! Engines are conditionally compiled based on feature flags.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

use crate::config::Config;
use crate::engine::OcrEngine;
use crate::error::OcrError;
use std::sync::Arc;

/// Create the detector used for the lifetime of the process
pub fn create_engine(config: &Config) -> Result<Arc<dyn OcrEngine>, OcrError> {
    let mut engine: Option<Arc<dyn OcrEngine>> = None;

    #[cfg(feature = "engine-ocrs")]
    {
        tracing::info!("Initializing ocrs engine...");
        let ocrs_engine = ocrs::OcrsEngine::new(config)?;
        tracing::info!(
            engine = ocrs_engine.name(),
            description = ocrs_engine.description(),
            "Engine ready"
        );
        engine = Some(Arc::new(ocrs_engine));
    }

    #[cfg(not(feature = "engine-ocrs"))]
    let _ = config;

    engine.ok_or_else(|| {
        OcrError::InitializationError(
            "No OCR engine available. Build with --features engine-ocrs".to_string(),
        )
    })
}
