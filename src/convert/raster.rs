//! In-process conversion engine, pure Rust with no external dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Dimension probe | `image::image_dimensions` (header only, no decode) |
//! | Decode (JPEG, PNG, TIFF, BMP) | `image` crate (pure Rust decoders) |
//! | Resize | `image::DynamicImage::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` |
//! | Encode → PNG | `PngEncoder` at `CompressionType::Best`, adaptive filter |
//! | Encode → BMP/TIFF | format re-save via `DynamicImage::write_to` |

use super::decision::{needs_resize, shrink_to_fit};
use super::engine::{Dimensions, Engine, EngineConfig, EngineError, check_rw_access};
use super::replace::{commit, staging_file};
use super::stats::ConversionStats;
use crate::scan::CatalogEntry;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Pure Rust engine using the `image` crate ecosystem.
///
/// Always constructible: every decoder and encoder it needs is statically
/// linked, so [`RasterEngine::new`] cannot report unavailability. The
/// `Result` return keeps the constructor signature identical across engines
/// for the factory.
pub struct RasterEngine {
    config: EngineConfig,
    stats: ConversionStats,
}

impl RasterEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            config,
            stats: ConversionStats::new(),
        })
    }

    /// Run the decision/transform/replace protocol for one file.
    ///
    /// Returns `None` for a skip, `Some(size_after)` for a processed file.
    fn try_convert(&self, entry: &CatalogEntry) -> Result<Option<u64>, EngineError> {
        check_rw_access(&entry.path)?;

        let (width, height) = image::image_dimensions(&entry.path).map_err(|e| {
            EngineError::ProcessingFailed(format!(
                "failed to read dimensions of {}: {e}",
                entry.path.display()
            ))
        })?;
        let dims = Dimensions { width, height };
        if !needs_resize(dims, self.config.max_size) {
            return Ok(None);
        }

        let img = load_image(&entry.path)?;
        let target = shrink_to_fit(dims, self.config.max_size);
        let resized = img.resize(target.width, target.height, FilterType::Lanczos3);

        let mut staged = staging_file(&entry.path)?;
        encode_image(&resized, staged.as_file_mut(), &entry.path, self.config.quality.value())?;
        let size_after = commit(staged, entry, self.config.test_mode)?;
        Ok(Some(size_after))
    }
}

impl Engine for RasterEngine {
    fn convert(&mut self, entry: &CatalogEntry) -> Result<bool, EngineError> {
        match self.try_convert(entry) {
            Ok(None) => {
                self.stats.add_skipped();
                Ok(false)
            }
            Ok(Some(size_after)) => {
                self.stats.add_processed(entry.size, size_after);
                Ok(true)
            }
            Err(e) => {
                self.stats.add_errored();
                Err(e)
            }
        }
    }

    fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    fn name(&self) -> &'static str {
        "raster"
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, EngineError> {
    ImageReader::open(path)
        .map_err(EngineError::Io)?
        .decode()
        .map_err(|e| {
            EngineError::ProcessingFailed(format!("failed to decode {}: {e}", path.display()))
        })
}

/// Encode `img` into `out` using the compression policy for the original
/// file's extension: quality for JPEG, maximum lossless effort for PNG,
/// plain re-save for everything else.
fn encode_image<W: Write + Seek>(
    img: &DynamicImage,
    out: W,
    original: &Path,
    quality: u32,
) -> Result<(), EngineError> {
    let ext = original
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mut writer = BufWriter::new(out);

    match ext.as_str() {
        "jpg" | "jpeg" => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, quality as u8);
            img.write_with_encoder(encoder).map_err(|e| {
                EngineError::ProcessingFailed(format!("JPEG encode failed: {e}"))
            })?;
        }
        "png" => {
            let encoder = PngEncoder::new_with_quality(
                &mut writer,
                CompressionType::Best,
                PngFilterType::Adaptive,
            );
            img.write_with_encoder(encoder)
                .map_err(|e| EngineError::ProcessingFailed(format!("PNG encode failed: {e}")))?;
        }
        other => {
            let format = ImageFormat::from_extension(other).ok_or_else(|| {
                EngineError::ProcessingFailed(format!("unsupported output format: {other}"))
            })?;
            img.write_to(&mut writer, format).map_err(|e| {
                EngineError::ProcessingFailed(format!("{other} encode failed: {e}"))
            })?;
        }
    }

    writer.flush().map_err(EngineError::Io)
}
