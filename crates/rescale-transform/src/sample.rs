//! Bilinear pixel sampling
//!
//! Reads the four source pixels surrounding a fractional coordinate and
//! blends each color channel independently. Coordinates outside the image
//! replicate the nearest edge pixel, so sampling never fails.

use rescale_core::{Channel, Pix};

/// Linear interpolation between `a` (t = 0) and `b` (t = 1).
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Bilinear interpolation between four corner values.
///
/// `c11` is top-left, `c21` top-right, `c12` bottom-left and `c22`
/// bottom-right. Blends along x first, then along y.
#[inline]
pub fn bilerp(c11: f64, c21: f64, c12: f64, c22: f64, dx: f64, dy: f64) -> f64 {
    lerp(lerp(c11, c21, dx), lerp(c12, c22, dx), dy)
}

/// Convert an interpolated channel value to 8 bits.
///
/// Rounds half to even and clamps to `[0, 255]`; NaN becomes 0.
#[inline]
pub fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Clamp a (possibly negative or huge) integral coordinate to `[0, len - 1]`.
#[inline]
fn clamp_coord(coord: f64, len: u32) -> u32 {
    if coord.is_nan() {
        return 0;
    }
    coord.clamp(0.0, (len - 1) as f64) as u32
}

/// Split a coordinate into its floor and fractional part.
///
/// Infinite coordinates have no fractional part; they sample the edge.
#[inline]
fn split(coord: f64) -> (f64, f64) {
    let floor = coord.floor();
    let frac = if coord.is_finite() { coord - floor } else { 0.0 };
    (floor, frac)
}

/// Sample `pix` at the fractional source coordinate `(fx, fy)`.
///
/// Returns the packed color obtained by bilinear interpolation of the
/// four neighbors `(x1, y1)`, `(x2, y1)`, `(x1, y2)`, `(x2, y2)` where
/// `x1 = floor(fx)`, `x2 = x1 + 1` (likewise for y), each clamped to the
/// image bounds. Sampling exactly on a pixel returns that pixel's color.
pub fn sample_bilinear(pix: &Pix, fx: f64, fy: f64) -> u32 {
    let w = pix.width();
    let h = pix.height();

    let (x0, dx) = split(fx);
    let (y0, dy) = split(fy);

    let x1 = clamp_coord(x0, w);
    let x2 = clamp_coord(x0 + 1.0, w);
    let y1 = clamp_coord(y0, h);
    let y2 = clamp_coord(y0 + 1.0, h);

    let p11 = pix.get_pixel_unchecked(x1, y1);
    let p21 = pix.get_pixel_unchecked(x2, y1);
    let p12 = pix.get_pixel_unchecked(x1, y2);
    let p22 = pix.get_pixel_unchecked(x2, y2);

    let mut values = [0u8; 4];
    for (value, channel) in values.iter_mut().zip(Channel::ALL) {
        let c = |p: u32| f64::from(channel.extract(p));
        *value = clamp_channel(bilerp(c(p11), c(p21), c(p12), c(p22), dx, dy));
    }
    Channel::compose(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Pix {
        Pix::from_data(2, 2, vec![0xFF0000FF, 0x00FF00FF, 0x0000FFFF, 0xFFFFFFFF]).unwrap()
    }

    #[test]
    fn test_lerp_and_bilerp() {
        assert_eq!(lerp(10.0, 20.0, 0.0), 10.0);
        assert_eq!(lerp(10.0, 20.0, 1.0), 20.0);
        assert_eq!(lerp(10.0, 20.0, 0.25), 12.5);
        assert_eq!(bilerp(0.0, 100.0, 100.0, 200.0, 0.5, 0.5), 100.0);
        assert_eq!(bilerp(1.0, 2.0, 3.0, 4.0, 0.0, 0.0), 1.0);
        assert_eq!(bilerp(1.0, 2.0, 3.0, 4.0, 1.0, 1.0), 4.0);
    }

    #[test]
    fn test_clamp_channel_rounding() {
        assert_eq!(clamp_channel(127.5), 128);
        assert_eq!(clamp_channel(126.5), 126);
        assert_eq!(clamp_channel(159.375), 159);
        assert_eq!(clamp_channel(63.75), 64);
        assert_eq!(clamp_channel(-3.0), 0);
        assert_eq!(clamp_channel(300.0), 255);
        assert_eq!(clamp_channel(f64::NAN), 0);
    }

    #[test]
    fn test_sample_on_pixel_returns_pixel() {
        let pix = quad();
        assert_eq!(sample_bilinear(&pix, 0.0, 0.0), 0xFF0000FF);
        assert_eq!(sample_bilinear(&pix, 1.0, 0.0), 0x00FF00FF);
        assert_eq!(sample_bilinear(&pix, 0.0, 1.0), 0x0000FFFF);
        assert_eq!(sample_bilinear(&pix, 1.0, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn test_sample_center_averages() {
        // 127.5 in every color channel rounds to 128
        assert_eq!(sample_bilinear(&quad(), 0.5, 0.5), 0x808080FF);
    }

    #[test]
    fn test_sample_quarter_offsets() {
        let pix = quad();
        assert_eq!(sample_bilinear(&pix, 0.25, 0.25), 0x9F4040FF);
        assert_eq!(sample_bilinear(&pix, 0.75, 0.25), 0x60BF40FF);
        assert_eq!(sample_bilinear(&pix, 0.25, 0.75), 0x6040BFFF);
        assert_eq!(sample_bilinear(&pix, 0.75, 0.75), 0x9FBFBFFF);
    }

    #[test]
    fn test_sample_outside_clamps_to_edge() {
        let pix = quad();
        assert_eq!(sample_bilinear(&pix, -5.0, -5.0), 0xFF0000FF);
        assert_eq!(sample_bilinear(&pix, -0.25, -0.25), 0xFF0000FF);
        assert_eq!(sample_bilinear(&pix, 7.5, -2.0), 0x00FF00FF);
        assert_eq!(sample_bilinear(&pix, -1.0, 1e9), 0x0000FFFF);
        assert_eq!(sample_bilinear(&pix, 1.25, 1.25), 0xFFFFFFFF);
        assert_eq!(
            sample_bilinear(&pix, f64::INFINITY, f64::INFINITY),
            0xFFFFFFFF
        );
        assert_eq!(
            sample_bilinear(&pix, f64::NEG_INFINITY, f64::NAN),
            0xFF0000FF
        );
    }

    #[test]
    fn test_sample_along_clamped_edge() {
        // Above the top row only x interpolation remains
        assert_eq!(sample_bilinear(&quad(), 0.25, -0.25), 0xBF4000FF);
    }

    #[test]
    fn test_alpha_interpolated_independently() {
        let pix = Pix::from_data(2, 1, vec![0x00000000, 0x000000FF]).unwrap();
        assert_eq!(sample_bilinear(&pix, 0.5, 0.0), 0x00000080);
    }

    #[test]
    fn test_single_pixel_image() {
        let pix = Pix::from_data(1, 1, vec![0x12345678]).unwrap();
        for (fx, fy) in [(0.0, 0.0), (-0.3, 0.7), (3.2, -8.0)] {
            assert_eq!(sample_bilinear(&pix, fx, fy), 0x12345678);
        }
    }
}
