//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` with content sniffing |
//! | Flatten alpha | blend over white, per pixel |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `jpeg_encoder::Encoder` with optimized Huffman tables |

use super::backend::{BackendError, Dimensions, ImageBackend, Optimized};
use super::calculations::fit_within;
use super::params::{OptimizeParams, Quality};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgb, RgbImage, Rgba};
use jpeg_encoder::{ColorType as JpegColorType, Encoder};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is guessed from the file contents first and the extension
/// second, so a PNG saved as `.jpg` still decodes. HEIC has no decoder
/// compiled in and fails here.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Composite any alpha onto an opaque white background.
///
/// Palette images arrive here already expanded to RGB/RGBA by the decoder.
/// Images without alpha are converted to RGB untouched.
fn flatten_onto_white(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

#[inline]
fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel);
    let a = u32::from(alpha);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Encode as JPEG with Huffman tables built from the image's own statistics.
///
/// JPEG stores dimensions as 16-bit values; larger rasters are rejected.
fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let too_large = || {
        BackendError::ProcessingFailed(format!(
            "{}x{} exceeds the JPEG size limit of 65535 pixels per side",
            img.width(),
            img.height()
        ))
    };
    let width = u16::try_from(img.width()).map_err(|_| too_large())?;
    let height = u16::try_from(img.height()).map_err(|_| too_large())?;

    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf, quality.as_u8());
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(img.as_raw(), width, height, JpegColorType::Rgb)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))?;
    Ok(buf)
}

/// Encode and write to `path`, returning the number of bytes written.
fn save_jpeg(img: &RgbImage, path: &Path, quality: Quality) -> Result<u64, BackendError> {
    let bytes = encode_jpeg(img, quality)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len() as u64)
}

impl ImageBackend for RustBackend {
    fn optimize(&self, params: &OptimizeParams) -> Result<Optimized, BackendError> {
        let img = load_image(&params.source)?;
        let source = Dimensions {
            width: img.width(),
            height: img.height(),
        };

        let flat = flatten_onto_white(img);

        let (width, height) = fit_within((source.width, source.height), params.bounds.as_tuple());
        let fitted = if (width, height) == (source.width, source.height) {
            flat
        } else {
            image::imageops::resize(&flat, width, height, FilterType::Lanczos3)
        };

        let bytes_written = save_jpeg(&fitted, &params.output, params.quality)?;

        Ok(Optimized {
            source,
            output: Dimensions { width, height },
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Bounds;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ColorType, ExtendedColorType, GenericImageView, ImageEncoder, RgbaImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn optimize(source: &Path, output: &Path) -> Result<Optimized, BackendError> {
        RustBackend::new().optimize(&OptimizeParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            bounds: Bounds::default(),
            quality: Quality::new(85),
        })
    }

    #[test]
    fn blend_extremes() {
        assert_eq!(blend_over_white(0, 0), 255);
        assert_eq!(blend_over_white(0, 255), 0);
        assert_eq!(blend_over_white(200, 255), 200);
        assert_eq!(blend_over_white(0, 128), 127);
    }

    #[test]
    fn flatten_keeps_opaque_rgb() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([10, 20, 30])));
        let flat = flatten_onto_white(img);
        assert_eq!(*flat.get_pixel(2, 2), Rgb([10, 20, 30]));
    }

    #[test]
    fn flatten_makes_transparent_white() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let flat = flatten_onto_white(DynamicImage::ImageRgba8(rgba));

        assert_eq!(*flat.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(3, 3), Rgb([255, 0, 0]));
    }

    #[test]
    fn flatten_grayscale_alpha() {
        let la = image::GrayAlphaImage::from_pixel(2, 2, image::LumaA([0, 0]));
        let flat = flatten_onto_white(DynamicImage::ImageLumaA8(la));
        assert_eq!(*flat.get_pixel(1, 1), Rgb([255, 255, 255]));
    }

    #[test]
    fn small_jpeg_keeps_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("small.jpg");
        let output = tmp.path().join("event-001.jpg");
        create_test_jpeg(&source, 320, 240);

        let result = optimize(&source, &output).unwrap();
        assert_eq!(result.source, Dimensions::from((320, 240)));
        assert_eq!(result.output, Dimensions::from((320, 240)));
        assert_eq!(image::image_dimensions(&output).unwrap(), (320, 240));
    }

    #[test]
    fn wide_jpeg_is_fitted_to_1920() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("wide.jpg");
        let output = tmp.path().join("event-001.jpg");
        create_test_jpeg(&source, 2400, 600);

        let result = optimize(&source, &output).unwrap();
        assert_eq!(result.output, Dimensions::from((1920, 480)));
        assert_eq!(image::image_dimensions(&output).unwrap(), (1920, 480));
    }

    #[test]
    fn bytes_written_matches_file_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("a.jpg");
        let output = tmp.path().join("event-001.jpg");
        create_test_jpeg(&source, 64, 64);

        let result = optimize(&source, &output).unwrap();
        assert!(result.bytes_written > 0);
        assert_eq!(
            result.bytes_written,
            std::fs::metadata(&output).unwrap().len()
        );
    }

    #[test]
    fn transparent_png_becomes_white_rgb_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        let output = tmp.path().join("event-001.jpg");

        // Left half fully transparent, right half opaque black
        let rgba = RgbaImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        rgba.save(&source).unwrap();

        optimize(&source, &output).unwrap();

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        let px = decoded.get_pixel(4, 32);
        // JPEG is lossy; previously transparent area must be near-white
        assert!(px[0] > 245 && px[1] > 245 && px[2] > 245, "got {px:?}");
        let dark = decoded.get_pixel(60, 32);
        assert!(dark[0] < 10, "got {dark:?}");
    }

    #[test]
    fn indexed_png_with_trns_becomes_white_rgb_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("palette.png");
        let output = tmp.path().join("event-001.jpg");

        // Palette [black, red] with black fully transparent.
        // Left half uses entry 0, right half entry 1.
        let (width, height) = (32u32, 32u32);
        let indices: Vec<u8> = (0..height)
            .flat_map(|_| (0..width).map(|x| u8::from(x >= width / 2)))
            .collect();
        let file = std::fs::File::create(&source).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![0, 0, 0, 255, 0, 0]);
        encoder.set_trns(vec![0, 255]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&indices).unwrap();
        writer.finish().unwrap();

        let result = optimize(&source, &output).unwrap();
        assert_eq!(result.output, Dimensions::from((width, height)));

        let decoded = image::open(&output).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb8);
        let white = decoded.get_pixel(2, 16);
        assert!(
            white[0] > 245 && white[1] > 245 && white[2] > 245,
            "got {white:?}"
        );
        let red = decoded.get_pixel(29, 16);
        assert!(red[0] > 240 && red[1] < 15 && red[2] < 15, "got {red:?}");
    }

    #[test]
    fn optimized_tables_are_no_larger_than_standard() {
        let img = RgbImage::from_fn(256, 256, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
        });
        let optimized = encode_jpeg(&img, Quality::new(85)).unwrap();

        let mut standard = Vec::new();
        Encoder::new(&mut standard, 85)
            .encode(img.as_raw(), 256, 256, JpegColorType::Rgb)
            .unwrap();

        assert!(
            optimized.len() <= standard.len(),
            "optimized {} > standard {}",
            optimized.len(),
            standard.len()
        );
        assert_eq!(
            image::load_from_memory(&optimized).unwrap().dimensions(),
            (256, 256)
        );
    }

    #[test]
    fn oversized_raster_is_rejected() {
        let img = RgbImage::new(65536, 1);
        let result = encode_jpeg(&img, Quality::default());
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn misnamed_png_decodes_by_content() {
        let tmp = tempfile::TempDir::new().unwrap();
        let png = tmp.path().join("real.png");
        RgbImage::from_pixel(10, 10, Rgb([1, 2, 3])).save(&png).unwrap();
        let source = tmp.path().join("actually-png.jpg");
        std::fs::rename(&png, &source).unwrap();

        let output = tmp.path().join("event-001.jpg");
        assert!(optimize(&source, &output).is_ok());
    }

    #[test]
    fn corrupt_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("corrupt.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let output = tmp.path().join("event-001.jpg");
        let result = optimize(&source, &output);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn nonexistent_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = optimize(
            &tmp.path().join("missing.jpg"),
            &tmp.path().join("event-001.jpg"),
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn rerun_overwrites_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("a.jpg");
        let output = tmp.path().join("event-001.jpg");
        create_test_jpeg(&source, 100, 80);
        std::fs::write(&output, b"stale").unwrap();

        optimize(&source, &output).unwrap();
        assert_eq!(image::image_dimensions(&output).unwrap(), (100, 80));
    }
}
