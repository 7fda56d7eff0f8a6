//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, BMP, GIF) | `image` crate (pure Rust decoders) |
//! | Identify | `ImageReader::into_dimensions` (header only, format sniffed) |
//! | Capture date | `kamadak-exif` via [`exif_reader`](super::exif_reader) |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |

use super::backend::{BackendError, Dimensions, ImageBackend, MetadataError};
use super::params::ResizeParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
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

/// Open an image with its format sniffed from the file contents, so a PNG
/// saved as `.jpg` is still read as PNG.
fn open_image(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_image(path)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save a DynamicImage to the given path, inferring format from extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => save_jpeg(img, path, quality),
        other => Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {}",
            other
        ))),
    }
}

/// Encode and save as baseline JPEG.
///
/// JPEG has no alpha channel, so the image is flattened to RGB8 first
/// (transparent PNG/GIF pixels keep their color values).
fn save_jpeg(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality as u8);
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_image(path)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn read_capture_date(&self, path: &Path) -> Result<String, MetadataError> {
        super::exif_reader::read_date_time_original(path)
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        write_resized(&load_image(&params.source)?, params)
    }

    /// Decodes each source once for a run of entries sharing it.
    fn resize_all(&self, params: &[ResizeParams]) -> Result<(), BackendError> {
        let mut decoded: Option<(&Path, DynamicImage)> = None;
        for p in params {
            let img = match decoded.take() {
                Some((source, img)) if source == p.source.as_path() => img,
                _ => load_image(&p.source)?,
            };
            write_resized(&img, p)?;
            decoded = Some((p.source.as_path(), img));
        }
        Ok(())
    }
}

/// Resize an already decoded image to `params` and encode it.
fn write_resized(img: &DynamicImage, params: &ResizeParams) -> Result<(), BackendError> {
    if (img.width(), img.height()) == (params.width, params.height) {
        save_image(img, &params.output, params.quality.value())
    } else {
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, params.quality.value())
    }
}
