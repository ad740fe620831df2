//! # Gallery Normalize
//!
//! Turns a folder of event photos into web-ready gallery JPEGs for a static
//! site, and prints the list of produced filenames for the site's front-end.
//!
//! ```text
//! photos/  →  discover  →  decode → flatten → fit → encode  →  assets/images/gallery/event-NNN.jpg
//!                                                             →  const photoFiles = [...]
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discover`] | Non-recursive, sorted, extension-filtered source listing |
//! | [`normalize`] | The run: per-file pipeline, typed outcomes, progress events |
//! | [`imaging`] | Pure-Rust pixel work behind the [`imaging::ImageBackend`] trait |
//! | [`config`] | Optional `gallery.toml` loading and validation |
//! | [`naming`] | `event-NNN.jpg` output naming and extension matching |
//! | [`output`] | CLI output formatting: progress lines, summary, snippet |
//!
//! # Design Decisions
//!
//! ## One Bad File Never Stops the Run
//!
//! Each source produces a `Result<ImageReport, ImageFailure>`. Only a missing
//! source directory, an empty source directory, or an unwritable output
//! directory abort the run.
//!
//! ## Indices Are Fixed at Discovery
//!
//! A source's output name is decided by its sorted position before any
//! decoding. A failure leaves a gap in the numbering rather than shifting
//! later files, so re-running after fixing one file does not rename the rest.
//!
//! ## JPEG Only, No Upscaling
//!
//! Every output is an opaque RGB JPEG. Transparency is composited onto white.
//! Photos larger than the bounding box are scaled down with Lanczos3; smaller
//! ones keep their size.

pub mod config;
pub mod discover;
pub mod imaging;
pub mod naming;
pub mod normalize;
pub mod output;
