//! Output filename convention.
//!
//! Every generated file is named `{prefix}-{NNNN}.jpg`, where `NNNN` is the
//! 1-based position in capture-date order, zero-padded to four digits. The
//! original filename plays no part, so the same position always produces the
//! same name:
//!
//! - prefix `RoboCamp-2024`, position 1 → `RoboCamp-2024-0001.jpg`
//! - prefix `X-2024`, position 7 → `X-2024-0007.jpg`
//! - position 12345 → `…-12345.jpg` (padding is a minimum width)

/// Minimum width of the zero-padded position.
pub const INDEX_WIDTH: usize = 4;

/// Build the output filename for a 1-based `position`.
pub fn output_name(prefix: &str, position: usize) -> String {
    format!("{prefix}-{position:0>width$}.jpg", width = INDEX_WIDTH)
}

/// Default filename prefix: `{label}-{year}`.
pub fn default_prefix(label: &str, year: &str) -> String {
    format!("{label}-{year}")
}

/// Recover the position from a name produced by [`output_name`].
///
/// Returns `None` for names that do not follow the convention for `prefix`.
pub fn parse_output_name(prefix: &str, name: &str) -> Option<usize> {
    let digits = name
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_suffix(".jpg")?;
    if digits.len() < INDEX_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|&n| n > 0)
}
