//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! ==> Found 3 images
//!     Output: assets/images/gallery
//!     Settings: max 1920x1080, quality 85%
//! ✓ IMG_0001.jpg → event-001.jpg
//!     4032x3024 → 1440x1080
//!     Original: 3120.4 KB → Optimized: 412.9 KB (86.8% reduction)
//! ✗ Error processing IMG_0002.HEIC: Processing failed: ...
//! ✓ logo.png → event-003.jpg
//!     512x512 (unchanged)
//!     Original: 20.1 KB → Optimized: 31.7 KB (-57.7% reduction)
//!
//! ==> Successfully optimized 2/3 images
//!     Saved to: assets/images/gallery
//!
//! Copy this into assets/js/main.js (loadPhotos function):
//!
//! const photoFiles = [
//!     'event-001.jpg',
//!     'event-003.jpg',
//! ];
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and, where the CLI needs it, a `print_*` wrapper that writes to
//! stdout. Format functions are pure and do no I/O.

use crate::imaging::{Bounds, Dimensions, Quality};
use crate::normalize::{ImageFailure, ImageReport, NormalizeEvent, NormalizeOutcome};
use std::path::Path;

/// Front-end file the snippet is meant to be pasted into.
const SNIPPET_TARGET: &str = "assets/js/main.js (loadPhotos function)";

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Bytes as kilobytes with one decimal.
fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

fn format_dims(dims: Dimensions) -> String {
    format!("{}x{}", dims.width, dims.height)
}

// ============================================================================
// Usage
// ============================================================================

/// Usage text shown when no source directory is given.
pub fn format_usage() -> Vec<String> {
    vec![
        "Usage: gallery-normalize <path_to_photos>".to_string(),
        String::new(),
        "Example:".to_string(),
        format!("{}gallery-normalize /path/to/hackathon/photos", indent(1)),
        format!("{}gallery-normalize ~/Downloads/event_photos", indent(1)),
    ]
}

pub fn print_usage() {
    for line in format_usage() {
        println!("{}", line);
    }
}

// ============================================================================
// Progress
// ============================================================================

fn format_started(total: usize, output_dir: &Path, bounds: Bounds, quality: Quality) -> Vec<String> {
    vec![
        format!("==> Found {} images", total),
        format!("{}Output: {}", indent(1), output_dir.display()),
        format!(
            "{}Settings: max {}x{}, quality {}%",
            indent(1),
            bounds.max_width,
            bounds.max_height,
            quality.value()
        ),
    ]
}

fn format_report(report: &ImageReport) -> Vec<String> {
    let resize = if report.source_dimensions == report.output_dimensions {
        format!("{} (unchanged)", format_dims(report.output_dimensions))
    } else {
        format!(
            "{} \u{2192} {}",
            format_dims(report.source_dimensions),
            format_dims(report.output_dimensions)
        )
    };

    vec![
        format!(
            "\u{2713} {} \u{2192} {}",
            report.source_name, report.output_name
        ),
        format!("{}{}", indent(1), resize),
        format!(
            "{}Original: {} \u{2192} Optimized: {} ({:.1}% reduction)",
            indent(1),
            format_kb(report.original_bytes),
            format_kb(report.optimized_bytes),
            report.reduction_percent()
        ),
    ]
}

fn format_failure(failure: &ImageFailure) -> Vec<String> {
    vec![format!(
        "\u{2717} Error processing {}: {}",
        failure.source_name, failure.error
    )]
}

/// Format a single progress event.
pub fn format_normalize_event(event: &NormalizeEvent) -> Vec<String> {
    match event {
        NormalizeEvent::Started {
            total,
            output_dir,
            bounds,
            quality,
        } => format_started(*total, output_dir, *bounds, *quality),
        NormalizeEvent::ImageOptimized(report) => format_report(report),
        NormalizeEvent::ImageFailed(failure) => format_failure(failure),
    }
}

// ============================================================================
// Summary
// ============================================================================

/// The `photoFiles` array literal for the front-end gallery.
pub fn format_photo_files_snippet(filenames: &[&str]) -> Vec<String> {
    let mut lines = vec!["const photoFiles = [".to_string()];
    lines.extend(
        filenames
            .iter()
            .map(|name| format!("{}'{}',", indent(1), name)),
    );
    lines.push("];".to_string());
    lines
}

/// Format the end-of-run summary: counts, output location, and the snippet.
pub fn format_summary(outcome: &NormalizeOutcome, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "==> Successfully optimized {}/{} images",
            outcome.success_count(),
            outcome.total()
        ),
        format!("{}Saved to: {}", indent(1), output_dir.display()),
        String::new(),
        format!("Copy this into {}:", SNIPPET_TARGET),
        String::new(),
    ];
    lines.extend(format_photo_files_snippet(&outcome.manifest()));
    lines
}

pub fn print_summary(outcome: &NormalizeOutcome, output_dir: &Path) {
    for line in format_summary(outcome, output_dir) {
        println!("{}", line);
    }
}
