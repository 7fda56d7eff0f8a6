//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Capture date** | `kamadak-exif` (`DateTimeOriginal`) |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
mod exif_reader;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend, MetadataError};
pub use calculations::{calculate_bounded_dimensions, fits_within};
pub use operations::{BoundedCopy, create_bounded_copies, create_bounded_copy, get_dimensions};
pub use params::{Quality, ResizeParams};
pub use rust_backend::RustBackend;
