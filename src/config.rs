//! Gallery configuration module.
//!
//! Handles loading and validating `gallery.toml`. Stock defaults are
//! overridden by an optional `gallery.toml` in the site root.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── gallery.toml             # Optional, overrides stock defaults
//! └── assets/
//!     └── images/
//!         └── gallery/         # Default output directory
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! max_width = 1920          # Bounding box width (never upscaled)
//! max_height = 1080         # Bounding box height (never upscaled)
//! quality = 85              # JPEG quality (0-100)
//!
//! [output]
//! dir = "assets/images/gallery"  # Relative to the site root
//! prefix = "event"               # Files are named <prefix>-NNN.jpg
//!
//! [discovery]
//! extensions = ["jpg", "jpeg", "png", "heic"]  # Matched case-insensitively
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [images]
//! quality = 80
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the site root.
pub const CONFIG_FILE: &str = "gallery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have defaults matching the site's gallery layout. User config
/// files need only specify the values they want to override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Bounding box and encoding quality.
    pub images: ImagesConfig,
    /// Where and under what names optimized files are written.
    pub output: OutputConfig,
    /// Which source files are picked up.
    pub discovery: DiscoveryConfig,
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.max_width == 0 || self.images.max_height == 0 {
            return Err(ConfigError::Validation(
                "images.max_width and images.max_height must be non-zero".into(),
            ));
        }
        if self.output.prefix.is_empty() {
            return Err(ConfigError::Validation(
                "output.prefix must not be empty".into(),
            ));
        }
        if self.discovery.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Output image settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG encoding quality (0 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 85,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory, relative to the site root.
    pub dir: String,
    /// Filename prefix: `<prefix>-001.jpg`.
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "assets/images/gallery".to_string(),
            prefix: "event".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    /// Accepted source extensions, without the dot. Compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "heic"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from `gallery.toml` in the given directory.
///
/// A missing file yields the stock defaults. Keys absent from the file keep
/// their defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(root: &Path) -> Result<GalleryConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str::<GalleryConfig>(&content)?
    } else {
        GalleryConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gallery.toml`.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Gallery Normalizer Configuration
# ===============================
# Place this file in the site root as gallery.toml.
# Every key is optional; omitted keys keep the values shown here.

[images]
# Bounding box for optimized photos. Larger photos are scaled down to fit,
# preserving aspect ratio. Smaller photos are never upscaled.
max_width = 1920
max_height = 1080
# JPEG quality, 0-100.
quality = 85

[output]
# Output directory, relative to the site root.
dir = "assets/images/gallery"
# Optimized files are named <prefix>-001.jpg, <prefix>-002.jpg, ...
prefix = "event"

[discovery]
# Source file extensions to pick up, matched case-insensitively.
# Only the immediate entries of the source directory are scanned.
extensions = ["jpg", "jpeg", "png", "heic"]
"##
}
