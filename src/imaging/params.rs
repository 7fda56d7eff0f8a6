//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! the [`operations`](super::operations) module (which decides the output size)
//! and the [`backend`](super::backend) (which does the pixel work), so a mock
//! backend can stand in for the real one in tests.

use std::path::PathBuf;

/// JPEG encoding quality (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    /// Matches the quality most photo libraries pick when none is given.
    fn default() -> Self {
        Self(75)
    }
}

/// Parameters for a resize-and-encode operation.
///
/// `width` and `height` are the exact output dimensions; the aspect-ratio math
/// has already happened in [`calculations`](super::calculations).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}
