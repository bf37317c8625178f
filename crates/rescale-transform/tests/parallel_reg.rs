//! Parallel resize regression test
//!
//! The row-banded driver must reproduce the sequential driver pixel for
//! pixel, for every worker count and both source sharing modes.

use rescale_core::{ImageFormat, Pix};
use rescale_test::{RegParams, checkerboard_pix, gradient_pix};
use rescale_transform::{
    ResizeOptions, SourceSharing, TransformError, resize, resize_parallel,
    resize_parallel_with_options, row_bands,
};

#[test]
fn parallel_reg() {
    let mut rp = RegParams::new("parallel");

    let pixs = gradient_pix(41, 29, true);

    for scale in [0.37, 1.9, 3.0] {
        let expected = resize(&pixs, scale).expect("sequential resize");
        for workers in [1, 2, 3, 4, 7, 64] {
            for sharing in [SourceSharing::Shared, SourceSharing::Isolated] {
                let opts = ResizeOptions::with_workers(workers)
                    .sharing(sharing)
                    .limit_to_available(false);
                let pixd =
                    resize_parallel_with_options(&pixs, scale, &opts).expect("parallel resize");
                if !rp.compare_pix(&expected, &pixd) {
                    eprintln!("  mismatch: scale {scale}, {workers} workers, {sharing:?}");
                }
                rp.compare_values(pixs.spp() as f64, pixd.spp() as f64, 0.0);
            }
        }
        rp.write_pix(&expected, ImageFormat::Png)
            .expect("write parallel");
    }

    // Default options cap pool threads at available parallelism, not bands
    let expected = resize(&pixs, 2.5).expect("sequential resize");
    let pixd = resize_parallel(&pixs, 2.5, 1000).expect("capped parallel resize");
    rp.compare_pix(&expected, &pixd);

    assert!(rp.cleanup(), "parallel regression test failed");
}

#[test]
fn parallel_bands_reg() {
    let mut rp = RegParams::new("parallel_bands");

    // A 6x5 image doubled is 10 rows tall; four workers get 3, 3, 3 and 1 rows
    let pixs = checkerboard_pix(6, 5, 2, 0x102030FF, 0xE0D0C0FF);
    let bands = row_bands(10, 4);
    let sizes: Vec<u32> = bands.iter().map(|b| b.rows()).collect();
    rp.compare_values(4.0, bands.len() as f64, 0.0);
    rp.compare_values(1.0, if sizes == [3, 3, 3, 1] { 1.0 } else { 0.0 }, 0.0);

    // The plan is the same whether or not threads are capped to the host
    let plan = ResizeOptions::with_workers(4).band_plan(10);
    rp.compare_values(1.0, if plan == bands { 1.0 } else { 0.0 }, 0.0);

    let pixd = resize_parallel(&pixs, 2.0, 4).expect("parallel 4 workers, default options");
    let expected = resize(&pixs, 2.0).expect("sequential resize");
    rp.compare_pix(&expected, &pixd);

    let opts = ResizeOptions::with_workers(4).limit_to_available(false);
    let pixd = resize_parallel_with_options(&pixs, 2.0, &opts).expect("parallel 4 workers");
    rp.compare_values(12.0, pixd.width() as f64, 0.0);
    rp.compare_values(10.0, pixd.height() as f64, 0.0);
    let expected = resize(&pixs, 2.0).expect("sequential resize");
    rp.compare_pix(&expected, &pixd);

    // Scale 1.0 returns an independent copy without starting workers
    let copy = resize_parallel(&pixs, 1.0, 4).expect("identity");
    rp.compare_pix(&pixs, &copy);
    rp.compare_values(0.0, if copy.shares_data_with(&pixs) { 1.0 } else { 0.0 }, 0.0);

    // The caller's handle is the only one left afterwards
    rp.compare_values(1.0, pixs.ref_count() as f64, 0.0);

    assert!(rp.cleanup(), "parallel_bands regression test failed");
}

#[test]
fn parallel_invalid_reg() {
    let pix = Pix::new(8, 8).expect("pix");

    for scale in [0.0, -1.5, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(
                resize_parallel(&pix, scale, 4),
                Err(TransformError::InvalidScale(_))
            ),
            "scale {scale} should be rejected"
        );
    }

    assert!(matches!(
        resize_parallel(&pix, 2.0, 0),
        Err(TransformError::InvalidWorkerCount(0))
    ));
    assert!(matches!(
        resize_parallel(&pix, 1e-3, 4),
        Err(TransformError::InvalidTargetSize { .. })
    ));

    let opts = ResizeOptions::with_workers(3).sharing(SourceSharing::Isolated);
    assert!(matches!(
        resize_parallel_with_options(&pix, -1.0, &opts),
        Err(TransformError::InvalidScale(_))
    ));
}
