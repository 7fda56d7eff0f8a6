//! Shared test utilities: synthetic images with and without EXIF dates.
//!
//! Real camera files are large and carry personal metadata, so tests build
//! their own: a gradient JPEG from the `image` encoder, optionally with a
//! minimal EXIF APP1 segment spliced in right after the SOI marker.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_jpeg_with_capture_date(&tmp.path().join("a.jpg"), 64, 48, "2024:07:14 09:30:00");
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::Path;

/// Encode a gradient JPEG of the given size and return its bytes.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut bytes)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    bytes
}

/// Write a JPEG with no metadata at all.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, jpeg_bytes(width, height)).unwrap();
}

/// Write a JPEG whose EXIF block carries `DateTimeOriginal = date`.
pub fn write_jpeg_with_capture_date(path: &Path, width: u32, height: u32, date: &str) {
    let jpeg = jpeg_bytes(width, height);
    let mut out = Vec::with_capacity(jpeg.len() + 64);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&exif_segment(date));
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Build a JPEG APP1 segment holding a little-endian TIFF block with one
/// Exif sub-IFD that contains only `DateTimeOriginal`.
///
/// Layout (offsets relative to the TIFF header):
///
/// ```text
///  0  "II" 42 8            header
///  8  IFD0: 1 entry        0x8769 ExifIFDPointer → 26
/// 26  Exif IFD: 1 entry    0x9003 DateTimeOriginal, ASCII → 44
/// 44  date bytes + NUL
/// ```
pub fn exif_segment(date: &str) -> Vec<u8> {
    const EXIF_IFD: u32 = 26;
    const VALUE_OFFSET: u32 = 44;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes()); // LONG
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&EXIF_IFD.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(tiff.len(), EXIF_IFD as usize);

    // Exif IFD
    let value_len = date.len() as u32 + 1;
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&value_len.to_le_bytes());
    tiff.extend_from_slice(&VALUE_OFFSET.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    assert_eq!(tiff.len(), VALUE_OFFSET as usize);

    tiff.extend_from_slice(date.as_bytes());
    tiff.push(0);

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}
