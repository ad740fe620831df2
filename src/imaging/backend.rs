//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the single seam between the normalizer and the
//! pixel work: one call takes a source file to a finished JPEG.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), pure Rust and statically
//! linked, no system codecs.

use super::params::OptimizeParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// What a successful optimization produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Optimized {
    /// Dimensions of the decoded source.
    pub source: Dimensions,
    /// Dimensions of the encoded JPEG.
    pub output: Dimensions,
    /// Size of the written JPEG in bytes.
    pub bytes_written: u64,
}

/// Trait for image processing backends.
///
/// `optimize` covers the whole per-file pipeline: decode, flatten alpha onto
/// white, fit inside the bounds, encode as JPEG, write to `params.output`.
pub trait ImageBackend {
    fn optimize(&self, params: &OptimizeParams) -> Result<Optimized, BackendError>;
}
