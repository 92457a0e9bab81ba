//! Crash-safe file replacement shared by both engines.
//!
//! The write path never leaves the original in a partially-written state:
//! the re-encoded image goes into a temporary file in the target's parent
//! directory (same filesystem), and only a fully-written temp file is
//! renamed over the original. Every failure path drops the temp file.

use super::engine::EngineError;
use crate::scan::CatalogEntry;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Create a temporary output file co-located with `target`.
///
/// The file keeps the target's extension so format-from-extension encoders
/// (ImageMagick in particular) produce the right container. Being in the
/// same directory guarantees the final persist is a same-filesystem rename.
pub(crate) fn staging_file(target: &Path) -> Result<NamedTempFile, EngineError> {
    let parent = target.parent().ok_or_else(|| {
        EngineError::ProcessingFailed(format!("no parent directory for {}", target.display()))
    })?;
    let suffix = match target.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    };
    Builder::new()
        .prefix(".imgshrink-")
        .suffix(&suffix)
        .tempfile_in(parent)
        .map_err(EngineError::Io)
}

/// Finish a conversion: measure the result, then replace the original.
///
/// Returns the encoded size in bytes. In test mode the temp file is closed
/// and deleted and the original is left untouched; the size is still
/// reported so test-mode statistics match a real run. In normal mode the
/// temp file is renamed over the original, the entry's permission bits are
/// restored exactly, and ownership is restored best-effort (a chown failure
/// is swallowed, not a conversion failure).
pub(crate) fn commit(
    staged: NamedTempFile,
    entry: &CatalogEntry,
    test_mode: bool,
) -> Result<u64, EngineError> {
    let size_after = staged.as_file().metadata().map_err(EngineError::Io)?.len();

    if test_mode {
        staged.close().map_err(EngineError::Io)?;
        return Ok(size_after);
    }

    staged.persist(&entry.path).map_err(|e| {
        // PersistError still owns the temp file; dropping it here deletes it.
        EngineError::ProcessingFailed(format!(
            "failed to replace {}: {}",
            entry.path.display(),
            e.error
        ))
    })?;

    fs::set_permissions(&entry.path, fs::Permissions::from_mode(entry.mode))
        .map_err(EngineError::Io)?;
    // Restoring ownership usually needs privileges; failure is not an error.
    let _ = std::os::unix::fs::chown(&entry.path, Some(entry.uid), Some(entry.gid));

    Ok(size_after)
}
