//! Conversion engine trait and shared types.
//!
//! The [`Engine`] trait is the capability contract both backends implement:
//! given a [`CatalogEntry`](crate::scan::CatalogEntry), decide whether the
//! file needs shrinking, and if so resize, re-compress, and atomically
//! replace it while preserving its permission bits and ownership.
//!
//! Implementations:
//! - [`RasterEngine`](super::raster::RasterEngine): in-process, `image` crate
//! - [`MagickEngine`](super::magick::MagickEngine): external ImageMagick tools

use super::stats::ConversionStats;
use crate::scan::CatalogEntry;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no {access} access to {path}")]
    Access { access: &'static str, path: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

/// Image dimensions from a probe, before any decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Quality setting for lossy re-encoding (1-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(97)
    }
}

/// Configuration shared by both engines. Immutable for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum pixel size of the longest side. Larger images are shrunk.
    pub max_size: u32,
    /// Re-encoding quality for lossy formats.
    pub quality: Quality,
    /// Compute statistics without replacing any file.
    pub test_mode: bool,
}

/// Trait for conversion engines.
///
/// `convert` consumes one catalog entry: returns `Ok(true)` if the file was
/// resized and replaced (or would have been, in test mode), `Ok(false)` if it
/// was skipped because it is already within bounds. Any failure leaves the
/// original file untouched, records it in the error counter, and propagates.
pub trait Engine {
    /// Convert one file, updating this engine's statistics.
    fn convert(&mut self, entry: &CatalogEntry) -> Result<bool, EngineError>;

    /// Statistics accumulated over all convert calls on this instance.
    fn stats(&self) -> &ConversionStats;

    /// Short human-readable engine name for progress output.
    fn name(&self) -> &'static str;
}

/// Verify read and write access to the target before any processing begins.
///
/// Runs before the dimension probe and before any temporary file exists, so
/// permission failures surface without expensive work and without touching
/// statistics size totals.
pub(crate) fn check_rw_access(path: &Path) -> Result<(), EngineError> {
    let deny = |access: &'static str| EngineError::Access {
        access,
        path: path.display().to_string(),
    };

    match File::open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::PermissionDenied => return Err(deny("read")),
        Err(e) => return Err(EngineError::Io(e)),
    }
    match OpenOptions::new().write(true).open(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::PermissionDenied => return Err(deny("write")),
        Err(e) => return Err(EngineError::Io(e)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::running_as_root;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(85).value(), 85);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_97() {
        assert_eq!(Quality::default().value(), 97);
    }

    #[test]
    fn access_check_passes_on_writable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("file.jpg");
        fs::write(&path, b"data").unwrap();

        assert!(check_rw_access(&path).is_ok());
    }

    #[test]
    fn access_check_reports_write_denied() {
        if running_as_root() {
            return;
        }
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("file.jpg");
        fs::write(&path, b"data").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

        match check_rw_access(&path) {
            Err(EngineError::Access { access, .. }) => assert_eq!(access, "write"),
            other => panic!("expected write-access error, got {other:?}"),
        }
    }

    #[test]
    fn access_check_missing_file_is_io_error() {
        let result = check_rw_access(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
