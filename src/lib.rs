//! # imgshrink
//!
//! Batch shrinker for oversized photos. Point it at a directory and every
//! image whose longest side exceeds the configured maximum is resized down,
//! re-compressed, and atomically swapped in place of the original, keeping
//! its path, permission bits, and owner. Images already within bounds are
//! left byte-for-byte untouched, so running it twice is harmless.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      directory tree  →  catalog        (paths + metadata, sorted)
//! 2. Convert   catalog entry   →  replaced file  (decide, resize, re-encode)
//! 3. Report    statistics      →  stdout         (counts, bytes, ratio)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the tree and captures each image's path, mode, owner, and size |
//! | [`convert`] | The engines: resize decision, re-encoding, atomic replacement, statistics |
//! | [`config`] | Lenient TOML config loading (`working_directory`, `max_size`, `quality`) |
//! | [`output`] | Pure progress/report formatters plus the stdout wrappers |
//!
//! # Design Decisions
//!
//! ## Two Engines, One Trait
//!
//! The [`convert::Engine`] trait has two implementations. The default
//! [`convert::RasterEngine`] is pure Rust via the `image` crate, so the
//! binary is self-contained. [`convert::MagickEngine`]
//! shells out to ImageMagick's `convert`/`identify` for installations that
//! prefer its encoders. [`convert::create_engine`] tries the preferred
//! engine and falls back to the other, so the batch runs wherever at least
//! one of them works.
//!
//! ## Originals Are Never Half-Written
//!
//! Every re-encode goes to a temporary file in the target's own directory
//! and only a fully-written result is renamed over the original. A crash or
//! encode failure at any point leaves the original byte-identical and the
//! temp file cleaned up.
//!
//! ## Skip Cheaply
//!
//! The resize decision reads only the image header (or asks `identify`), so
//! a mostly-shrunk tree re-scans in milliseconds per file with no decoding.

pub mod config;
pub mod convert;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
