//! External conversion engine driving the ImageMagick command-line tools.
//!
//! Uses `identify` for the dimension probe and `convert` for the actual
//! resize and re-encode. Both binaries are probed with `-version` at
//! construction time, so an engine instance only exists when the tools are
//! runnable. Output always goes to a staging file first; ImageMagick never
//! writes over the original in place.

use super::decision::needs_resize;
use super::engine::{Dimensions, Engine, EngineConfig, EngineError, check_rw_access};
use super::replace::{commit, staging_file};
use super::stats::ConversionStats;
use crate::scan::CatalogEntry;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Engine backed by the ImageMagick `convert` and `identify` binaries.
pub struct MagickEngine {
    config: EngineConfig,
    stats: ConversionStats,
}

impl MagickEngine {
    /// Probe both required binaries. Fails with [`EngineError::Unavailable`]
    /// if either is missing or does not respond to `-version`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        for tool in ["convert", "identify"] {
            probe_tool(tool)?;
        }
        Ok(Self {
            config,
            stats: ConversionStats::new(),
        })
    }

    /// Ask `identify` for the pixel dimensions without decoding the image.
    ///
    /// The probe targets `file[0]`: for multi-frame images (multi-page TIFF,
    /// animations) `identify` emits the format string once per frame with no
    /// separator, so only the first frame is queried.
    fn probe_dimensions(&self, path: &Path) -> Result<Dimensions, EngineError> {
        let mut first_frame = path.as_os_str().to_os_string();
        first_frame.push("[0]");
        let output = Command::new("identify")
            .arg("-format")
            .arg("%w %h")
            .arg(&first_frame)
            .output()
            .map_err(EngineError::Io)?;
        if !output.status.success() {
            return Err(EngineError::ProcessingFailed(format!(
                "identify failed on {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_dimensions(&String::from_utf8_lossy(&output.stdout))
    }

    fn try_convert(&self, entry: &CatalogEntry) -> Result<Option<u64>, EngineError> {
        check_rw_access(&entry.path)?;

        let dims = self.probe_dimensions(&entry.path)?;
        if !needs_resize(dims, self.config.max_size) {
            return Ok(None);
        }

        // The `>` geometry suffix makes ImageMagick itself apply the
        // shrink-only, aspect-preserving rule.
        let staged = staging_file(&entry.path)?;
        let mut cmd = Command::new("convert");
        cmd.arg(&entry.path).arg("-resize").arg(format!(
            "{max}x{max}>",
            max = self.config.max_size
        ));
        match extension_of(&entry.path).as_str() {
            "jpg" | "jpeg" => {
                cmd.arg("-quality").arg(self.config.quality.value().to_string());
            }
            "png" => {
                cmd.arg("-quality")
                    .arg("100")
                    .arg("-define")
                    .arg("png:compression-level=9")
                    .arg("-interlace")
                    .arg("PNG");
            }
            _ => {}
        }
        cmd.arg(staged.path());

        let output = cmd.output().map_err(EngineError::Io)?;
        if !output.status.success() {
            return Err(EngineError::ProcessingFailed(format!(
                "convert failed on {}: {}",
                entry.path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let size_after = commit(staged, entry, self.config.test_mode)?;
        Ok(Some(size_after))
    }
}

impl Engine for MagickEngine {
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
        "imagemagick"
    }
}

/// Run `<tool> -version` and map the outcome onto availability.
fn probe_tool(tool: &str) -> Result<(), EngineError> {
    let result = Command::new(tool).arg("-version").output();
    match result {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(EngineError::Unavailable(format!(
            "{tool} -version exited with {}",
            output.status
        ))),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(EngineError::Unavailable(format!(
            "{tool} not found on PATH"
        ))),
        Err(e) => Err(EngineError::Io(e)),
    }
}

/// Parse `identify -format "%w %h"` output into dimensions.
///
/// Exactly two tokens are required. More than two means the tool reported
/// several frames, and guessing which pair is real would misjudge the image.
fn parse_dimensions(raw: &str) -> Result<Dimensions, EngineError> {
    let mut parts = raw.split_whitespace();
    let parse = |s: Option<&str>| {
        s.and_then(|v| v.parse::<u32>().ok()).ok_or_else(|| {
            EngineError::ProcessingFailed(format!("unparseable identify output: {raw:?}"))
        })
    };
    let width = parse(parts.next())?;
    let height = parse(parts.next())?;
    if parts.next().is_some() {
        return Err(EngineError::ProcessingFailed(format!(
            "unparseable identify output: {raw:?}"
        )));
    }
    Ok(Dimensions { width, height })
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
