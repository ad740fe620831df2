//! Gallery image normalization.
//!
//! Takes a directory of heterogeneous photos and writes a numbered directory of
//! web-ready JPEGs:
//!
//! ```text
//! photos/                      assets/images/gallery/
//! ├── IMG_0001.jpg      →      ├── event-001.jpg
//! ├── IMG_0002.HEIC     →      ├── event-002.jpg   (or a reported failure)
//! └── logo.png          →      └── event-003.jpg   (transparency → white)
//! ```
//!
//! ## Per-file pipeline
//!
//! `Discovered → Decoded → (Flattened) → Fitted → Encoded → Reported`
//!
//! Any step can fail. A failure is captured as that file's
//! [`ImageFailure`] and the run moves on to the next file; only problems with
//! the directories themselves abort the run ([`NormalizeError`]).
//!
//! ## Numbering
//!
//! Indices are assigned at discovery, so a failed file leaves a gap:
//! if the second of three files fails, the output is `event-001.jpg` and
//! `event-003.jpg`. Nothing is renumbered.
//!
//! ## Sequential Processing
//!
//! Files are processed one at a time in sorted order. Progress is reported
//! through an optional [`NormalizeEvent`] channel so the caller decides how to
//! display it.

use crate::config::GalleryConfig;
use crate::discover::{SourceImage, discover};
use crate::imaging::{
    Bounds, Dimensions, ImageBackend, OptimizeParams, Quality, RustBackend, reduction_percent,
};
use crate::naming::output_filename;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("{} is not a valid directory", .0.display())]
    InvalidInput(PathBuf),
    #[error("No image files found in {}", .0.display())]
    EmptyInput(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings for a normalization run.
#[derive(Debug, Clone)]
pub struct NormalizeSettings {
    pub bounds: Bounds,
    pub quality: Quality,
    /// Accepted source extensions, without the dot.
    pub extensions: Vec<String>,
    /// Output filename prefix (`event` → `event-001.jpg`).
    pub prefix: String,
}

impl NormalizeSettings {
    /// Build settings from the loaded `gallery.toml`.
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            bounds: Bounds::new(config.images.max_width, config.images.max_height),
            quality: Quality::new(config.images.quality),
            extensions: config.discovery.extensions.clone(),
            prefix: config.output.prefix.clone(),
        }
    }
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

/// A successfully optimized image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    pub index: usize,
    pub source_name: String,
    pub output_name: String,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
    pub source_dimensions: Dimensions,
    pub output_dimensions: Dimensions,
}

impl ImageReport {
    /// Bytes saved as a percentage of the original (negative if it grew).
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.original_bytes, self.optimized_bytes)
    }
}

/// A source file that could not be optimized.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFailure {
    pub index: usize,
    pub source_name: String,
    pub error: String,
}

/// Outcome of one file.
pub type ImageOutcome = Result<ImageReport, ImageFailure>;

/// Outcome of a whole run, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub results: Vec<ImageOutcome>,
}

impl NormalizeOutcome {
    /// Number of discovered files.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.reports().count()
    }

    pub fn reports(&self) -> impl Iterator<Item = &ImageReport> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ImageFailure> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    /// Output filenames of successful images, in assigned order.
    pub fn manifest(&self) -> Vec<&str> {
        self.reports().map(|r| r.output_name.as_str()).collect()
    }
}

/// Progress events sent while a run is in flight.
#[derive(Debug, Clone)]
pub enum NormalizeEvent {
    /// Discovery finished; processing is about to start.
    Started {
        total: usize,
        output_dir: PathBuf,
        bounds: Bounds,
        quality: Quality,
    },
    ImageOptimized(ImageReport),
    ImageFailed(ImageFailure),
}

pub fn normalize(
    source_dir: &Path,
    output_dir: &Path,
    settings: &NormalizeSettings,
    events: Option<Sender<NormalizeEvent>>,
) -> Result<NormalizeOutcome, NormalizeError> {
    let backend = RustBackend::new();
    normalize_with_backend(&backend, source_dir, output_dir, settings, events)
}

/// Normalize using a specific backend (allows testing with mock).
pub fn normalize_with_backend(
    backend: &impl ImageBackend,
    source_dir: &Path,
    output_dir: &Path,
    settings: &NormalizeSettings,
    events: Option<Sender<NormalizeEvent>>,
) -> Result<NormalizeOutcome, NormalizeError> {
    if !source_dir.is_dir() {
        return Err(NormalizeError::InvalidInput(source_dir.to_path_buf()));
    }

    fs::create_dir_all(output_dir)?;

    let sources = discover(source_dir, &settings.extensions)?;
    if sources.is_empty() {
        return Err(NormalizeError::EmptyInput(source_dir.to_path_buf()));
    }

    // A dropped receiver only means nobody is watching; keep going.
    let emit = |event: NormalizeEvent| {
        if let Some(tx) = &events {
            tx.send(event).ok();
        }
    };

    emit(NormalizeEvent::Started {
        total: sources.len(),
        output_dir: output_dir.to_path_buf(),
        bounds: settings.bounds,
        quality: settings.quality,
    });

    let mut results = Vec::with_capacity(sources.len());
    for source in &sources {
        let outcome = optimize_one(backend, source, output_dir, settings);
        emit(match &outcome {
            Ok(report) => NormalizeEvent::ImageOptimized(report.clone()),
            Err(failure) => NormalizeEvent::ImageFailed(failure.clone()),
        });
        results.push(outcome);
    }

    Ok(NormalizeOutcome { results })
}

/// Plan the optimization of one source without executing it.
pub fn plan_optimize(
    source: &SourceImage,
    output_dir: &Path,
    settings: &NormalizeSettings,
) -> OptimizeParams {
    OptimizeParams {
        source: source.path.clone(),
        output: output_dir.join(output_filename(&settings.prefix, source.index)),
        bounds: settings.bounds,
        quality: settings.quality,
    }
}

fn optimize_one(
    backend: &impl ImageBackend,
    source: &SourceImage,
    output_dir: &Path,
    settings: &NormalizeSettings,
) -> ImageOutcome {
    let fail = |error: String| ImageFailure {
        index: source.index,
        source_name: source.filename.clone(),
        error,
    };

    let params = plan_optimize(source, output_dir, settings);
    let original_bytes = fs::metadata(&source.path)
        .map_err(|e| fail(e.to_string()))?
        .len();
    let optimized = backend
        .optimize(&params)
        .map_err(|e| fail(e.to_string()))?;

    Ok(ImageReport {
        index: source.index,
        source_name: source.filename.clone(),
        output_name: output_filename(&settings.prefix, source.index),
        original_bytes,
        optimized_bytes: optimized.bytes_written,
        source_dimensions: optimized.source,
        output_dimensions: optimized.output,
    })
}
