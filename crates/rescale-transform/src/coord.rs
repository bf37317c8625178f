//! Output-to-source coordinate mapping

/// Map an output pixel coordinate to a fractional source coordinate.
///
/// Samples at the center of the output pixel rather than its top-left
/// corner: `(coord + 0.5) / scale - 0.5`. The result may lie outside the
/// source image; the sampler clamps it.
///
/// `scale` must be positive.
#[inline]
pub fn map_coordinate(coord: f64, scale: f64) -> f64 {
    (coord + 0.5) / scale - 0.5
}
