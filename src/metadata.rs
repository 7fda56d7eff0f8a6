//! Capture-date lookup at the pipeline boundary.
//!
//! The only metadata the gallery cares about is when a photograph was taken:
//! the EXIF `DateTimeOriginal` tag. The backend reports *why* a date is
//! unavailable as a [`MetadataError`]; this module turns that into plain
//! presence or absence for the rest of the pipeline and logs the reason.
//!
//! ## Absence is not an error
//!
//! A photo without the tag (screenshots, edited exports, scans), a file that
//! cannot be opened, or a file whose EXIF block is corrupt is simply left out
//! of the gallery. Nothing propagates to the caller. There is no fallback to
//! the filesystem modification time.

use crate::imaging::{ImageBackend, MetadataError};
use std::path::{Path, PathBuf};

/// A scanned input file and its capture date, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub source_path: PathBuf,
    pub capture_timestamp: Option<String>,
}

/// Look up the capture timestamp of one image.
///
/// Returns `None` when the image has no usable date; the reason is logged
/// at `warn` level.
pub fn capture_date(backend: &impl ImageBackend, path: &Path) -> Option<String> {
    match backend.read_capture_date(path) {
        Ok(timestamp) => Some(timestamp),
        Err(reason) => {
            log_exclusion(path, &reason);
            None
        }
    }
}

/// Read the capture date of every path, preserving order.
pub fn read_records(backend: &impl ImageBackend, paths: &[PathBuf]) -> Vec<ImageRecord> {
    paths
        .iter()
        .map(|path| ImageRecord {
            source_path: path.clone(),
            capture_timestamp: capture_date(backend, path),
        })
        .collect()
}

fn log_exclusion(path: &Path, reason: &MetadataError) {
    log::warn!(
        "{}: {}, left out of the gallery",
        path.display(),
        reason
    );
}
