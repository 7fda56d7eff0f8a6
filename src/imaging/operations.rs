//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_bounded_dimensions;
use super::params::{Quality, ResizeParams};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// A resized copy written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCopy {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Plan a bounded resize without executing it.
pub fn plan_bounded_copy(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    max_edge: u32,
    quality: Quality,
) -> ResizeParams {
    let (width, height) = calculate_bounded_dimensions(original_dims, max_edge);
    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality,
    }
}

/// Write a copy of `source` whose longer edge is at most `max_edge`.
pub fn create_bounded_copy(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    max_edge: u32,
    quality: Quality,
) -> Result<BoundedCopy> {
    let [copy] =
        create_bounded_copies(backend, source, original_dims, [(output, max_edge)], quality)?;
    Ok(copy)
}

/// Write several bounded copies of one source, given as `(output, max_edge)`
/// pairs, in a single backend call so the source is decoded once.
pub fn create_bounded_copies<const N: usize>(
    backend: &impl ImageBackend,
    source: &Path,
    original_dims: (u32, u32),
    targets: [(&Path, u32); N],
    quality: Quality,
) -> Result<[BoundedCopy; N]> {
    let params = targets.map(|(output, max_edge)| {
        let params = plan_bounded_copy(source, output, original_dims, max_edge, quality);
        log::debug!(
            "{} {}x{} -> {}x{} (max {})",
            source.display(),
            original_dims.0,
            original_dims.1,
            params.width,
            params.height,
            max_edge
        );
        params
    });
    backend.resize_all(&params)?;

    Ok(params.map(|params| BoundedCopy {
        path: params.output,
        width: params.width,
        height: params.height,
    }))
}
