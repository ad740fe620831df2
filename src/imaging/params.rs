//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the normalizer (which decides which file goes where) and
//! the [`backend`](super::backend) (which does the actual pixel work). This
//! separation allows swapping backends (e.g. for testing with a mock) without
//! changing the normalizer.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 85). Clamped on construction.
//! - [`Bounds`]: Bounding box an image must fit inside (never upscaled).
//! - [`OptimizeParams`]: Full specification for one optimization: source, output path, bounds, quality.

use std::path::PathBuf;

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The quality as the byte JPEG encoders take.
    pub fn as_u8(self) -> u8 {
        u8::try_from(self.0).unwrap_or(100)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Maximum output dimensions. Images already inside the box keep their size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_width: u32,
    pub max_height: u32,
}

impl Bounds {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.max_width, self.max_height)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Parameters for a single decode → flatten → fit → encode run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub bounds: Bounds,
    pub quality: Quality,
}
