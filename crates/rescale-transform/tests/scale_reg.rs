//! Scale regression test
//!
//! Sequential bilinear resizing: output dimensions, the 2x2 color
//! quad reference values, exact sampling on pixel centers, and argument
//! validation.

use rescale_core::{ImageFormat, Pix};
use rescale_test::{RegParams, checkerboard_pix, gradient_pix, pix_from_colors};
use rescale_transform::{TransformError, resize, target_size};

const QUAD: [u32; 4] = [0xFF0000FF, 0x00FF00FF, 0x0000FFFF, 0xFFFFFFFF];

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    let pixs = gradient_pix(37, 23, false);
    let w = pixs.width();
    let h = pixs.height();

    // --- Test 1: Scale up 2x ---
    let up2 = resize(&pixs, 2.0).expect("scale 2x");
    rp.compare_values((w * 2) as f64, up2.width() as f64, 0.0);
    rp.compare_values((h * 2) as f64, up2.height() as f64, 0.0);
    rp.write_pix(&up2, ImageFormat::Png).expect("write up2");
    eprintln!("  scale 2x: {}x{}", up2.width(), up2.height());

    // --- Test 2: Scale down 0.5x (18.5 and 11.5 round up) ---
    let down2 = resize(&pixs, 0.5).expect("scale 0.5x");
    rp.compare_values(19.0, down2.width() as f64, 0.0);
    rp.compare_values(12.0, down2.height() as f64, 0.0);
    rp.write_pix(&down2, ImageFormat::Png).expect("write down2");

    // --- Test 3: Non-integral factor ---
    let odd = resize(&pixs, 1.37).expect("scale 1.37x");
    rp.compare_values(51.0, odd.width() as f64, 0.0);
    rp.compare_values(32.0, odd.height() as f64, 0.0);
    rp.compare_values(
        1.0,
        if target_size(&pixs, 1.37).ok() == Some((51, 32)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // --- Test 4: Scale 1.0 is an independent copy ---
    let s1 = resize(&pixs, 1.0).expect("scale 1x");
    rp.compare_pix(&pixs, &s1);
    rp.compare_values(0.0, if s1.shares_data_with(&pixs) { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "scale regression test failed");
}

#[test]
fn scale_quad_reg() {
    let mut rp = RegParams::new("scale_quad");

    let quad = pix_from_colors(2, 2, &QUAD).expect("quad");

    // --- Upscale: corners replicate, interior blends ---
    let up = resize(&quad, 2.0).expect("upscale quad");
    rp.write_pix(&up, ImageFormat::Png).expect("write up");
    #[rustfmt::skip]
    let expected = pix_from_colors(4, 4, &[
        0xFF0000FF, 0xBF4000FF, 0x40BF00FF, 0x00FF00FF,
        0xBF0040FF, 0x9F4040FF, 0x60BF40FF, 0x40FF40FF,
        0x4000BFFF, 0x6040BFFF, 0x9FBFBFFF, 0xBFFFBFFF,
        0x0000FFFF, 0x4040FFFF, 0xBFBFFFFF, 0xFFFFFFFF,
    ])
    .expect("expected quad");
    rp.compare_pix(&expected, &up);

    // Center 2x2 block averages to the source average on every channel
    for (i, shift) in [24u32, 16, 8].into_iter().enumerate() {
        let sum: u32 = [(1, 1), (2, 1), (1, 2), (2, 2)]
            .iter()
            .map(|&(x, y)| (up.get_pixel(x, y).unwrap_or(0) >> shift) & 0xff)
            .sum();
        eprintln!("  channel {}: center mean {}", i, sum as f64 / 4.0);
        rp.compare_values(127.5, sum as f64 / 4.0, 0.0);
    }

    // --- Downscale to a single averaged pixel ---
    let down = resize(&quad, 0.5).expect("downscale quad");
    rp.compare_values(1.0, down.width() as f64, 0.0);
    rp.compare_values(1.0, down.height() as f64, 0.0);
    rp.compare_values(
        0x808080FFu32 as f64,
        down.get_pixel(0, 0).unwrap_or(0) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "scale_quad regression test failed");
}

#[test]
fn scale_exact_reg() {
    let mut rp = RegParams::new("scale_exact");

    // Downscaling by 1/3 samples exactly on source pixel centers
    let pixs = gradient_pix(30, 21, true);
    let third = resize(&pixs, 1.0 / 3.0).expect("scale 1/3");
    rp.compare_values(10.0, third.width() as f64, 0.0);
    rp.compare_values(7.0, third.height() as f64, 0.0);
    let mut mismatches = 0;
    for y in 0..third.height() {
        for x in 0..third.width() {
            if third.get_pixel(x, y) != pixs.get_pixel(3 * x + 1, 3 * y + 1) {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);
    rp.compare_values(4.0, third.spp() as f64, 0.0);

    // A uniform image stays uniform at any scale
    let flat = checkerboard_pix(13, 9, 4, 0x336699C0, 0x336699C0);
    for scale in [0.25, 0.8, 1.5, 4.2] {
        let pixd = resize(&flat, scale).expect("scale flat");
        let uniform = pixd.data().iter().all(|&p| p == 0x336699C0);
        rp.compare_values(1.0, if uniform { 1.0 } else { 0.0 }, 0.0);
    }

    // Hard edges never produce values outside the two inputs' range
    let board = checkerboard_pix(16, 16, 4, 0x000000FF, 0xFFFFFFFF);
    let pixd = resize(&board, 2.7).expect("scale board");
    rp.write_pix(&pixd, ImageFormat::Png).expect("write board");
    let gray = pixd.data().iter().all(|&p| {
        let r = p >> 24;
        (p >> 16) & 0xff == r && (p >> 8) & 0xff == r && p & 0xff == 0xff
    });
    rp.compare_values(1.0, if gray { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "scale_exact regression test failed");
}

#[test]
fn scale_invalid_reg() {
    let pix = Pix::new(8, 8).expect("pix");

    for scale in [0.0, -0.0, -2.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = resize(&pix, scale);
        assert!(
            matches!(result, Err(TransformError::InvalidScale(_))),
            "scale {scale} should be rejected"
        );
    }

    // 8 * 0.05 = 0.4 rounds to an empty image
    assert!(matches!(
        resize(&pix, 0.05),
        Err(TransformError::InvalidTargetSize { .. })
    ));
}
