//! Image scaling with bilinear interpolation
//!
//! Every output pixel `(x, y)` is mapped back into source space with
//! [`map_coordinate`] and sampled with [`sample_bilinear`]. Output pixels
//! are independent of each other, which is what allows
//! [`crate::resize_parallel`] to split the work into row bands.

use crate::coord::map_coordinate;
use crate::sample::sample_bilinear;
use crate::{TransformError, TransformResult};
use rescale_core::{Pix, PixMut};
use tracing::debug;

/// Check that `scale` is a positive finite number.
pub fn validate_scale(scale: f64) -> TransformResult<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(TransformError::InvalidScale(scale));
    }
    Ok(())
}

/// Compute the output dimensions for scaling `pix` by `scale`.
///
/// Each dimension is `round(dimension * scale)`, rounding halves up.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScale`] for a non-positive or
/// non-finite scale, and [`TransformError::InvalidTargetSize`] if either
/// dimension rounds to zero or exceeds `u32::MAX`.
pub fn target_size(pix: &Pix, scale: f64) -> TransformResult<(u32, u32)> {
    validate_scale(scale)?;
    let width = (f64::from(pix.width()) * scale).round();
    let height = (f64::from(pix.height()) * scale).round();
    let fits = |v: f64| v >= 1.0 && v <= f64::from(u32::MAX);
    if !fits(width) || !fits(height) {
        return Err(TransformError::InvalidTargetSize { width, height });
    }
    Ok((width as u32, height as u32))
}

/// Resample output row `y` into `row`, whose length is the target width.
pub(crate) fn resample_row(src: &Pix, scale: f64, y: u32, row: &mut [u32]) {
    let fy = map_coordinate(f64::from(y), scale);
    for (x, dst) in row.iter_mut().enumerate() {
        let fx = map_coordinate(x as f64, scale);
        *dst = sample_bilinear(src, fx, fy);
    }
}

/// Scale an image by `scale` using bilinear interpolation.
///
/// A scale of exactly 1 returns an independent copy of the input.
///
/// # Arguments
/// * `pix` - Input image
/// * `scale` - Scale factor applied to both axes (e.g., 2.0 = double size)
///
/// # Errors
///
/// Returns [`TransformError::InvalidScale`] if `scale` is zero, negative,
/// or not finite, and [`TransformError::InvalidTargetSize`] if the scaled
/// image would be empty or too large. No output is allocated on error.
pub fn resize(pix: &Pix, scale: f64) -> TransformResult<Pix> {
    validate_scale(scale)?;
    if scale == 1.0 {
        return Ok(pix.deep_clone());
    }

    let (tw, th) = target_size(pix, scale)?;
    debug!(
        src_width = pix.width(),
        src_height = pix.height(),
        scale,
        target_width = tw,
        target_height = th,
        "resizing sequentially"
    );

    let mut out = PixMut::new(tw, th)?;
    out.copy_format_from(pix);
    for y in 0..th {
        resample_row(pix, scale, y, out.row_data_mut(y));
    }

    Ok(out.into())
}
