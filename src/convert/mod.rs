//! Image conversion: decide, shrink, re-compress, replace.
//!
//! Two interchangeable engines implement the [`Engine`] trait:
//! [`RasterEngine`] works entirely in process via the `image` crate, and
//! [`MagickEngine`] shells out to the ImageMagick tools. [`create_engine`]
//! picks one with ordered fallback. The shared pieces live in their own
//! modules: the pure resize math in [`decision`], the crash-safe file
//! replacement in `replace`, and the batch counters in [`stats`].

pub mod decision;
pub mod engine;
pub mod factory;
pub mod magick;
pub mod raster;
mod replace;
pub mod stats;

pub use decision::{needs_resize, shrink_to_fit};
pub use engine::{Dimensions, Engine, EngineConfig, EngineError, Quality};
pub use factory::{EngineKind, create_engine};
pub use magick::MagickEngine;
pub use raster::RasterEngine;
pub use stats::ConversionStats;
