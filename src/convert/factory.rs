//! Engine selection with ordered fallback.
//!
//! The caller states a preference; the factory tries that engine first and
//! falls back to the other one if construction fails. Only when every
//! candidate fails does the factory give up, and the error names each
//! candidate with its own failure reason.

use super::engine::{Engine, EngineConfig, EngineError};
use super::magick::MagickEngine;
use super::raster::RasterEngine;

/// Which engine to try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// In-process `image`-crate engine. The default preference.
    #[default]
    Raster,
    /// External ImageMagick tools.
    Magick,
}

type Constructor = fn(EngineConfig) -> Result<Box<dyn Engine>, EngineError>;

fn make_raster(config: EngineConfig) -> Result<Box<dyn Engine>, EngineError> {
    RasterEngine::new(config).map(|e| Box::new(e) as Box<dyn Engine>)
}

fn make_magick(config: EngineConfig) -> Result<Box<dyn Engine>, EngineError> {
    MagickEngine::new(config).map(|e| Box::new(e) as Box<dyn Engine>)
}

/// Construct the first engine that succeeds, in preference order.
pub fn create_engine(
    config: EngineConfig,
    prefer: EngineKind,
) -> Result<Box<dyn Engine>, EngineError> {
    let order: [(&str, Constructor); 2] = match prefer {
        EngineKind::Raster => [("raster", make_raster), ("imagemagick", make_magick)],
        EngineKind::Magick => [("imagemagick", make_magick), ("raster", make_raster)],
    };
    try_in_order(config, &order)
}

fn try_in_order(
    config: EngineConfig,
    candidates: &[(&str, Constructor)],
) -> Result<Box<dyn Engine>, EngineError> {
    let mut failures = Vec::new();
    for (name, construct) in candidates {
        match construct(config) {
            Ok(engine) => return Ok(engine),
            Err(e) => failures.push(format!("{name}: {e}")),
        }
    }
    Err(EngineError::Unavailable(format!(
        "no usable engine ({})",
        failures.join("; ")
    )))
}
