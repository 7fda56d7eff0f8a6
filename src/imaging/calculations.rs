//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions that fit inside a `max_edge` square.
///
/// The longer edge becomes exactly `max_edge`, the shorter edge is scaled by
/// the same ratio and rounded. Images that already fit are returned unchanged:
/// there is no upscaling.
///
/// # Arguments
/// * `original` - Source dimensions (width, height)
/// * `max_edge` - Cap for the longer edge in pixels
///
/// # Examples
/// ```
/// # use year_gal::imaging::calculate_bounded_dimensions;
/// // 3000x2000 landscape capped at 1500 → 1500x1000
/// assert_eq!(calculate_bounded_dimensions((3000, 2000), 1500), (1500, 1000));
///
/// // Already small enough → untouched
/// assert_eq!(calculate_bounded_dimensions((400, 300), 500), (400, 300));
/// ```
pub fn calculate_bounded_dimensions(original: (u32, u32), max_edge: u32) -> (u32, u32) {
    if fits_within(original, max_edge) {
        return original;
    }

    let (orig_w, orig_h) = original;
    let longer_edge = orig_w.max(orig_h);

    let ratio = max_edge as f64 / longer_edge as f64;
    let scale = |edge: u32| ((edge as f64 * ratio).round() as u32).max(1);

    if orig_w >= orig_h {
        // Landscape or square
        (max_edge, scale(orig_h))
    } else {
        // Portrait
        (scale(orig_w), max_edge)
    }
}

/// Whether `dims` already fit inside a `max_edge` square.
pub fn fits_within(dims: (u32, u32), max_edge: u32) -> bool {
    dims.0.max(dims.1) <= max_edge
}
