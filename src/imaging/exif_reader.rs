//! EXIF capture-date lookup.
//!
//! Reads the EXIF block of a JPEG, TIFF, PNG, WebP or HEIF container with
//! `kamadak-exif` and returns the `DateTimeOriginal` tag (`0x9003`) as stored,
//! e.g. `"2024:07:14 09:30:00"`. The fixed `YYYY:MM:DD HH:MM:SS` layout makes
//! plain string comparison chronological, so no parsing happens here.
//!
//! Formats that cannot carry EXIF at all (BMP, GIF) report
//! [`MetadataError::NoMetadata`], the same as a JPEG without an EXIF block.
//! Only a container whose EXIF block fails to parse is
//! [`MetadataError::Malformed`].

use super::backend::MetadataError;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// kamadak-exif's reason for a file that is not a container it knows.
const UNKNOWN_CONTAINER: &str = "Unknown image format";

/// Read the capture timestamp of the image at `path`.
pub fn read_date_time_original(path: &Path) -> Result<String, MetadataError> {
    let file = File::open(path).map_err(MetadataError::Unreadable)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| match e {
            exif::Error::NotFound(_) => MetadataError::NoMetadata,
            exif::Error::InvalidFormat(reason) if reason == UNKNOWN_CONTAINER => {
                MetadataError::NoMetadata
            }
            exif::Error::Io(io) => MetadataError::Unreadable(io),
            other => MetadataError::Malformed(other.to_string()),
        })?;
    date_time_original(&exif)
}

fn date_time_original(exif: &exif::Exif) -> Result<String, MetadataError> {
    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or(MetadataError::TagMissing)?;

    match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|raw| ascii_value(raw))
            .filter(|value| !value.is_empty())
            .ok_or(MetadataError::EmptyValue),
        other => Err(MetadataError::Malformed(format!(
            "DateTimeOriginal has non-ASCII value {other:?}"
        ))),
    }
}

/// Decode an EXIF ASCII value, dropping NUL padding and surrounding spaces.
fn ascii_value(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}
