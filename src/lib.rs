//! # Year Gal
//!
//! Turns one year's folder of photographs into a ready-to-include gallery:
//! display copies, thumbnails, and an HTML fragment listing them in the order
//! they were taken.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      original/2024/     →  candidate images   (by extension)
//! 2. Date      EXIF DateTimeOriginal  →  ordered list   (undated images dropped)
//! 3. Process   ordered list       →  img/2024/, thumb/2024/  ({prefix}-NNNN.jpg)
//! 4. Render    ordered names      →  generateGallery.html
//! ```
//!
//! Steps 1-3 live in [`process`]; step 4 in [`gallery`]. Nothing is kept
//! between runs except the files written. Re-running over the same input
//! produces the same names and the same markup.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `gallery.toml` loading, validation, and job resolution |
//! | [`metadata`] | Capture-date lookup; absence excludes an image |
//! | [`naming`] | `{prefix}-NNNN.jpg` output filename convention |
//! | [`imaging`] | Pure-Rust image operations: identify, EXIF date, bounded resize |
//! | [`process`] | Scan, order, name, and resize one year's images |
//! | [`gallery`] | Render and write the HTML fragment with maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Capture Date Only
//!
//! Ordering uses the EXIF `DateTimeOriginal` string as written by the camera
//! (`YYYY:MM:DD HH:MM:SS`), compared as text. That format sorts
//! chronologically, so no date parsing is needed. Images without the tag are
//! left out rather than guessed at.
//!
//! ## Names Before Pixels
//!
//! Every output name is fixed before any image is decoded. Resizing can then
//! run in parallel without affecting which photograph gets which number.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, JPEG
//! encoding) and `kamadak-exif`. No system libraries are needed.

pub mod config;
pub mod gallery;
pub mod imaging;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
