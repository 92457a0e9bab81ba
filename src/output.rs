//! CLI output formatting.
//!
//! Each piece of output has a pure `format_*` function (returns a `String`
//! or `Vec<String>`, no I/O, unit-testable) and a `print_*` wrapper that
//! writes to stdout. Progress is one line per file as the batch runs; the
//! final report summarizes the statistics with human-readable byte sizes.
//!
//! ```text
//! engine: raster
//! [  1/300] processed /photos/a.jpg
//! [  2/300] skipped   /photos/b.jpg
//! [  3/300] error     /photos/c.jpg: failed to decode ...
//! ============================================================
//! Files found:        300
//!   processed:        212
//!   skipped:          87
//!   errors:           1
//! Size before:        1.56 GiB
//! Size after:         412.00 MiB
//! Saved:              1.16 GiB (74.2%)
//! ============================================================
//! ```

use crate::convert::ConversionStats;
use std::path::Path;

const SEPARATOR_WIDTH: usize = 60;

// ============================================================================
// Byte formatting
// ============================================================================

/// Format a byte count with binary units (B, KiB, MiB, GiB).
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;
    const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.2} GiB", b / GIB)
    } else if b >= MIB {
        format!("{:.2} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.2} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Format a possibly-negative byte delta, keeping the sign visible.
pub fn format_saved(bytes: i64) -> String {
    if bytes < 0 {
        format!("-{}", format_size(bytes.unsigned_abs()))
    } else {
        format_size(bytes as u64)
    }
}

// ============================================================================
// Per-file progress lines
// ============================================================================

fn progress_line(index: usize, total: usize, status: &str, detail: &str) -> String {
    let width = total.to_string().len();
    format!("[{index:>width$}/{total}] {status:<9} {detail}")
}

/// One line for a file that was resized and replaced.
pub fn format_processed(index: usize, total: usize, path: &Path) -> String {
    progress_line(index, total, "processed", &path.display().to_string())
}

/// One line for a file left alone because it was already within bounds.
pub fn format_skipped(index: usize, total: usize, path: &Path) -> String {
    progress_line(index, total, "skipped", &path.display().to_string())
}

/// One line for a file that failed; the batch continues after it.
pub fn format_error(index: usize, total: usize, path: &Path, error: &str) -> String {
    progress_line(
        index,
        total,
        "error",
        &format!("{}: {error}", path.display()),
    )
}

// ============================================================================
// Final report
// ============================================================================

/// Format the end-of-batch summary.
pub fn format_report(stats: &ConversionStats) -> Vec<String> {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    vec![
        separator.clone(),
        format!("Files found:        {}", stats.total_files()),
        format!("  processed:        {}", stats.processed),
        format!("  skipped:          {}", stats.skipped),
        format!("  errors:           {}", stats.errored),
        format!("Size before:        {}", format_size(stats.size_before)),
        format!("Size after:         {}", format_size(stats.size_after)),
        format!(
            "Saved:              {} ({:.1}%)",
            format_saved(stats.saved_bytes()),
            stats.compression_ratio()
        ),
        separator,
    ]
}

pub fn print_report(stats: &ConversionStats) {
    for line in format_report(stats) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // =========================================================================
    // Byte formatting tests
    // =========================================================================

    #[test]
    fn format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn format_size_kib() {
        assert_eq!(format_size(1024), "1.00 KiB");
        assert_eq!(format_size(1536), "1.50 KiB");
    }

    #[test]
    fn format_size_mib() {
        assert_eq!(format_size(1024 * 1024), "1.00 MiB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MiB");
    }

    #[test]
    fn format_size_gib() {
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GiB");
    }

    #[test]
    fn format_saved_keeps_negative_sign() {
        assert_eq!(format_saved(-2048), "-2.00 KiB");
        assert_eq!(format_saved(2048), "2.00 KiB");
        assert_eq!(format_saved(0), "0 B");
    }

    // =========================================================================
    // Progress line tests
    // =========================================================================

    #[test]
    fn processed_line_pads_index_to_total_width() {
        let path = PathBuf::from("/photos/a.jpg");
        assert_eq!(
            format_processed(1, 300, &path),
            "[  1/300] processed /photos/a.jpg"
        );
    }

    #[test]
    fn skipped_line_aligns_with_processed() {
        let path = PathBuf::from("/photos/b.jpg");
        assert_eq!(
            format_skipped(42, 300, &path),
            "[ 42/300] skipped   /photos/b.jpg"
        );
    }

    #[test]
    fn error_line_includes_the_message() {
        let path = PathBuf::from("/photos/c.jpg");
        let line = format_error(3, 9, &path, "failed to decode");
        assert_eq!(line, "[3/9] error     /photos/c.jpg: failed to decode");
    }

    // =========================================================================
    // Report tests
    // =========================================================================

    #[test]
    fn report_shows_all_counters() {
        let mut stats = ConversionStats::new();
        stats.add_processed(2048, 1024);
        stats.add_skipped();
        stats.add_errored();

        let lines = format_report(&stats);
        let text = lines.join("\n");
        assert!(text.contains("Files found:        3"));
        assert!(text.contains("processed:        1"));
        assert!(text.contains("skipped:          1"));
        assert!(text.contains("errors:           1"));
        assert!(text.contains("Size before:        2.00 KiB"));
        assert!(text.contains("Size after:         1.00 KiB"));
        assert!(text.contains("Saved:              1.00 KiB (50.0%)"));
    }

    #[test]
    fn report_is_framed_by_separators() {
        let stats = ConversionStats::new();
        let lines = format_report(&stats);
        assert_eq!(lines.first().unwrap(), &"=".repeat(60));
        assert_eq!(lines.last().unwrap(), &"=".repeat(60));
    }

    #[test]
    fn empty_run_reports_zero_ratio() {
        let stats = ConversionStats::new();
        let text = format_report(&stats).join("\n");
        assert!(text.contains("(0.0%)"));
    }
}
