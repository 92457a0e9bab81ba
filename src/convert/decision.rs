//! Pure calculation functions for the resize decision.
//!
//! All functions here are pure and testable without any I/O or images.

use super::engine::Dimensions;

/// Whether an image needs to be shrunk at all.
///
/// True when the longest side exceeds `max_size`. Images at or below the
/// limit are skipped without decoding or writing anything.
pub fn needs_resize(dims: Dimensions, max_size: u32) -> bool {
    dims.width.max(dims.height) > max_size
}

/// Calculate target dimensions so the longest side equals `max_size`.
///
/// The shorter side is scaled by the same ratio and rounded to the nearest
/// integer (never below 1), preserving aspect ratio within one pixel.
/// Callers must only invoke this when [`needs_resize`] is true, so the
/// result never upscales.
///
/// # Examples
/// ```
/// # use imgshrink::convert::{Dimensions, shrink_to_fit};
/// // 3000x2000 landscape at max 1920 → 1920x1280
/// let out = shrink_to_fit(Dimensions { width: 3000, height: 2000 }, 1920);
/// assert_eq!((out.width, out.height), (1920, 1280));
/// ```
pub fn shrink_to_fit(dims: Dimensions, max_size: u32) -> Dimensions {
    let Dimensions { width, height } = dims;

    if width >= height {
        // Landscape or square: width is the longest side
        let ratio = max_size as f64 / width as f64;
        Dimensions {
            width: max_size,
            height: ((height as f64 * ratio).round() as u32).max(1),
        }
    } else {
        // Portrait
        let ratio = max_size as f64 / height as f64;
        Dimensions {
            width: ((width as f64 * ratio).round() as u32).max(1),
            height: max_size,
        }
    }
}
