//! Output filename convention for optimized gallery images.
//!
//! Every optimized image is named `<prefix>-NNN.jpg`, where `NNN` is the
//! 1-based position of its source in sorted discovery order, zero-padded to
//! three digits. Indices past 999 simply grow wider (`event-1000.jpg`).
//!
//! The index belongs to the source file, not to the success count, so a
//! failed source leaves a gap in the sequence instead of renumbering the rest.

/// Extension of every optimized file.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Build the output filename for a 1-based index.
///
/// - `output_filename("event", 1)` → `"event-001.jpg"`
/// - `output_filename("event", 42)` → `"event-042.jpg"`
pub fn output_filename(prefix: &str, index: usize) -> String {
    format!("{}-{:03}.{}", prefix, index, OUTPUT_EXTENSION)
}

/// Whether `ext` (without the dot) is in the allow-list, ignoring case.
pub fn has_accepted_extension(ext: &str, accepted: &[String]) -> bool {
    accepted.iter().any(|a| a.eq_ignore_ascii_case(ext))
}
