//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the pipeline needs:
//! identify, read_capture_date, and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` and
//! `kamadak-exif` crates and statically linked into the binary.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Why an image has no usable capture date.
///
/// Every variant is recoverable: the image is left out of the gallery and the
/// run continues. See [`metadata::capture_date`](crate::metadata::capture_date).
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("cannot read file: {0}")]
    Unreadable(#[source] std::io::Error),
    #[error("no EXIF metadata")]
    NoMetadata,
    #[error("unreadable EXIF metadata: {0}")]
    Malformed(String),
    #[error("no DateTimeOriginal tag")]
    TagMissing,
    #[error("DateTimeOriginal tag is empty")]
    EmptyValue,
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared by rayon workers.
pub trait ImageBackend: Sync {
    /// Get image dimensions without decoding pixels.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read the raw EXIF `DateTimeOriginal` value, e.g. `"2024:07:14 09:30:00"`.
    fn read_capture_date(&self, path: &Path) -> Result<String, MetadataError>;

    /// Decode the source, resize to the exact dimensions, encode to the output path.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Run several resizes in order, stopping at the first error.
    ///
    /// Backends that decode may reuse one decoded image for consecutive
    /// entries with the same source.
    fn resize_all(&self, params: &[ResizeParams]) -> Result<(), BackendError> {
        params.iter().try_for_each(|p| self.resize(p))
    }
}
