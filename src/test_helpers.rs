//! Shared test fixtures: synthetic images and catalog entries.

use crate::scan::CatalogEntry;
use image::ImageEncoder;
use std::fs;
use std::io::BufWriter;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;

/// Permission bits do not apply to root, so denied-access tests must bail
/// out when the suite runs privileged (e.g. in a container).
pub(crate) fn running_as_root() -> bool {
    fs::metadata("/proc/self")
        .map(|m| m.uid() == 0)
        .unwrap_or(false)
}

/// Create a small valid JPEG file with the given dimensions.
pub(crate) fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub(crate) fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    img.save(path).unwrap();
}

/// Build a catalog entry from a file's current metadata.
pub(crate) fn entry_for(path: &Path) -> CatalogEntry {
    let meta = fs::metadata(path).unwrap();
    CatalogEntry {
        path: path.to_path_buf(),
        mode: meta.permissions().mode() & 0o777,
        uid: meta.uid(),
        gid: meta.gid(),
        size: meta.len(),
    }
}
