//! Filesystem discovery: build the catalog of images to process.
//!
//! Walks a directory tree and collects every file whose extension marks it
//! as a supported raster image. Each hit is captured as a [`CatalogEntry`]
//! with the metadata the conversion stage needs to restore after an atomic
//! replacement: permission bits, owner, group, and the size on disk at
//! discovery time.
//!
//! The catalog is sorted by path so a batch run visits files in a stable,
//! reproducible order regardless of directory iteration order.

use std::fmt;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Extensions treated as processable images, matched case-insensitively.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "bmp", "tiff", "tif", "png"];

/// One discovered image with the metadata needed to reconstruct it after
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    /// Permission bits only (mode masked with 0o777).
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    /// Size in bytes at discovery time.
    pub size: u64,
}

impl CatalogEntry {
    fn from_path(path: PathBuf) -> Result<Self, std::io::Error> {
        let meta = std::fs::metadata(&path)?;
        Ok(Self {
            mode: meta.permissions().mode() & 0o777,
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.len(),
            path,
        })
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Recursively discover all images under `root`, sorted by path.
///
/// Symlinks are not followed. A missing or non-directory root is an error;
/// so is any unreadable directory inside the tree, since silently skipping
/// part of the tree would misreport the batch as complete.
pub fn find_images(root: &Path) -> Result<Vec<CatalogEntry>, ScanError> {
    let meta = std::fs::metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ScanError::NotFound(root.to_path_buf())
        } else {
            ScanError::Io(e)
        }
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut catalog = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            catalog.push(CatalogEntry::from_path(entry.into_path())?);
        }
    }

    catalog.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"fake image").unwrap();
    }

    #[test]
    fn finds_images_across_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("vacation/day1");
        fs::create_dir_all(&sub).unwrap();
        touch(&tmp.path().join("top.jpg"));
        touch(&sub.join("beach.png"));
        touch(&sub.join("hotel.tiff"));

        let catalog = find_images(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn extensions_match_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.JPG"));
        touch(&tmp.path().join("b.Jpeg"));
        touch(&tmp.path().join("c.PNG"));
        touch(&tmp.path().join("d.TIF"));
        touch(&tmp.path().join("e.bmp"));

        let catalog = find_images(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn non_image_files_are_excluded() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("notes.txt"));
        touch(&tmp.path().join("archive.zip"));
        touch(&tmp.path().join("noextension"));
        touch(&tmp.path().join("photo.jpg"));

        let catalog = find_images(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog[0].path.ends_with("photo.jpg"));
    }

    #[test]
    fn catalog_is_sorted_by_path() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("zebra.jpg"));
        touch(&tmp.path().join("alpha.jpg"));
        let sub = tmp.path().join("middle");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("nested.jpg"));

        let catalog = find_images(tmp.path()).unwrap();
        let names: Vec<String> = catalog
            .iter()
            .map(|e| {
                e.path
                    .strip_prefix(tmp.path())
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["alpha.jpg", "middle/nested.jpg", "zebra.jpg"]);
    }

    #[test]
    fn entry_captures_file_metadata() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        fs::write(&path, b"0123456789").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let catalog = find_images(tmp.path()).unwrap();
        let entry = &catalog[0];
        assert_eq!(entry.size, 10);
        assert_eq!(entry.mode, 0o640);

        let meta = fs::metadata(&path).unwrap();
        assert_eq!(entry.uid, meta.uid());
        assert_eq!(entry.gid, meta.gid());
    }

    #[test]
    fn empty_tree_yields_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = find_images(tmp.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn missing_root_is_not_found() {
        let result = find_images(Path::new("/nonexistent/photos"));
        assert!(matches!(result, Err(ScanError::NotFound(_))));
    }

    #[test]
    fn file_as_root_is_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("photo.jpg");
        touch(&file);

        let result = find_images(&file);
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn display_shows_the_path() {
        let entry = CatalogEntry {
            path: PathBuf::from("/photos/a.jpg"),
            mode: 0o644,
            uid: 0,
            gid: 0,
            size: 1,
        };
        assert_eq!(entry.to_string(), "/photos/a.jpg");
    }
}
