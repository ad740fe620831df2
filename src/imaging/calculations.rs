//! Pure calculation functions for image dimensions and file sizes.
//!
//! All functions here are pure and testable without any I/O or images.

/// Fit `source` inside `bounds`, preserving aspect ratio.
///
/// This is a bounding-box thumbnail, not a scale-to-fit: an image that already
/// fits is returned unchanged, never upscaled. Otherwise the limiting axis lands
/// exactly on its bound and the other axis is scaled proportionally and rounded.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Maximum dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Output dimensions, each at least 1px
///
/// A zero-sized bounding box cannot hold any image, so the source is returned
/// unchanged.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if max_w == 0 || max_h == 0 || (src_w <= max_w && src_h <= max_h) {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

/// Percentage of bytes saved going from `original` to `optimized`.
///
/// Negative when the output is larger (e.g. a small PNG re-encoded as JPEG).
/// An empty original reports `0.0` rather than dividing by zero.
pub fn reduction_percent(original: u64, optimized: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - optimized as f64) / original as f64 * 100.0
}
