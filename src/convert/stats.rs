//! Conversion statistics accumulated over one batch run.

/// Mutable counters scoped to one engine instance / one batch run.
///
/// Every convert call increments exactly one of `processed`, `skipped`, or
/// `errored`, so `total_files()` always equals the number of files offered
/// to the engine. Size totals only accumulate for processed files.
///
/// `size_after <= size_before` is the expected outcome but is not enforced:
/// a pathological file can grow under re-encoding, so [`saved_bytes`]
/// (`ConversionStats::saved_bytes`) is signed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub processed: u64,
    pub skipped: u64,
    pub errored: u64,
    pub size_before: u64,
    pub size_after: u64,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that was resized and replaced.
    pub fn add_processed(&mut self, size_before: u64, size_after: u64) {
        self.processed += 1;
        self.size_before += size_before;
        self.size_after += size_after;
    }

    /// Record a file left alone because it was already within bounds.
    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record a file that failed (access or decode/transform error).
    pub fn add_errored(&mut self) {
        self.errored += 1;
    }

    /// Total files offered to the engine.
    pub fn total_files(&self) -> u64 {
        self.processed + self.skipped + self.errored
    }

    /// Bytes saved across the batch. Negative if re-encoding grew files.
    pub fn saved_bytes(&self) -> i64 {
        self.size_before as i64 - self.size_after as i64
    }

    /// Saved bytes as a percentage of the original size.
    ///
    /// Defined as 0.0 when nothing was processed, so an empty or all-skipped
    /// run never divides by zero.
    pub fn compression_ratio(&self) -> f64 {
        if self.size_before == 0 {
            return 0.0;
        }
        self.saved_bytes() as f64 / self.size_before as f64 * 100.0
    }
}
