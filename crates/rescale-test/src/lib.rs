//! rescale-test - Regression test framework for rescale
//!
//! This crate provides a small regression test harness with two modes:
//!
//! - **Compare**: Check computed values and images, report every mismatch
//! - **Display**: Same checks, and also write intermediate images to
//!   `tests/regout` for visual inspection
//!
//! It also builds deterministic synthetic images so tests need no fixtures
//! on disk.
//!
//! # Usage
//!
//! ```ignore
//! use rescale_test::{RegParams, gradient_pix};
//!
//! let mut rp = RegParams::new("scale");
//! rp.compare_values(40.0, scaled.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rescale_core::{Pix, PixMut, color};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // rescale-test is at crates/rescale-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Build an image from row-major packed pixels.
pub fn pix_from_colors(width: u32, height: u32, colors: &[u32]) -> TestResult<Pix> {
    Ok(Pix::from_data(width, height, colors.to_vec())?)
}

/// Build a smooth color gradient.
///
/// Red ramps left to right, green top to bottom, blue along the diagonal.
/// With `with_alpha`, alpha follows a repeating pattern and `spp` is 4;
/// otherwise every pixel is opaque and `spp` is 3.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn gradient_pix(width: u32, height: u32, with_alpha: bool) -> Pix {
    let mut pm = PixMut::new(width, height).expect("gradient dimensions must be non-zero");
    let xden = width.saturating_sub(1).max(1);
    let yden = height.saturating_sub(1).max(1);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / xden) as u8;
            let g = (y * 255 / yden) as u8;
            let b = ((x + y) * 255 / (xden + yden)) as u8;
            let a = if with_alpha {
                ((x * 7 + y * 13) % 256) as u8
            } else {
                255
            };
            pm.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
        }
    }
    if with_alpha {
        pm.set_spp(4);
    }
    pm.into()
}

/// Build a checkerboard of `cell` x `cell` squares alternating `c0` and `c1`.
///
/// # Panics
///
/// Panics if either dimension or `cell` is zero.
pub fn checkerboard_pix(width: u32, height: u32, cell: u32, c0: u32, c1: u32) -> Pix {
    assert!(cell > 0, "checkerboard cell size must be non-zero");
    let mut pm = PixMut::new(width, height).expect("checkerboard dimensions must be non-zero");
    for y in 0..height {
        for x in 0..width {
            let val = if (x / cell + y / cell) % 2 == 0 { c0 } else { c1 };
            pm.set_pixel_unchecked(x, y, val);
        }
    }
    pm.into()
}
