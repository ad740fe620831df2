//! Image processing in pure Rust, no system codecs.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content-sniffed) |
//! | **Flatten** | alpha blended over white |
//! | **Fit** | Lanczos3 resize into a bounding box, never upscaling |
//! | **Encode** | `jpeg_encoder::Encoder`, optimized Huffman tables |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and size math (unit testable)
//! - **Parameters**: Data structures describing an optimization
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, Optimized};
pub use calculations::{fit_within, reduction_percent};
pub use params::{Bounds, OptimizeParams, Quality};
pub use rust_backend::RustBackend;
