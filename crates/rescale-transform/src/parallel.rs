//! Row-banded parallel resampling
//!
//! The output rows `[0, target_height)` are split into contiguous
//! [`RowBand`]s, one per worker. Each worker resamples its band into a
//! private buffer using the same per-row routine as [`crate::resize`], so
//! the result is pixel-identical to the sequential path for any worker
//! count. Buffers are copied into the output image in band order once every
//! worker has finished.
//!
//! Workers run on a dedicated thread pool that lives for a single call.
//! The first band that fails raises a shared cancellation flag, which the
//! remaining bands poll once per row.

use crate::scale::{resample_row, target_size, validate_scale};
use crate::{TransformError, TransformResult};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use rescale_core::{Pix, PixMut};
use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// A contiguous half-open range `[y_start, y_end)` of output rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowBand {
    /// First row (inclusive)
    pub y_start: u32,
    /// Last row (exclusive)
    pub y_end: u32,
}

impl RowBand {
    /// Create a band covering `y_start..y_end`.
    pub fn new(y_start: u32, y_end: u32) -> Self {
        Self { y_start, y_end }
    }

    /// Number of rows in the band.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.y_end.saturating_sub(self.y_start)
    }

    /// Check whether the band covers no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }
}

/// Partition `[0, target_height)` into at most `worker_count` bands.
///
/// Every band holds `ceil(target_height / worker_count)` rows except the
/// last, which may be shorter. Bands that would be empty (more workers
/// than rows) are omitted. A `worker_count` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// use rescale_transform::{RowBand, row_bands};
///
/// let bands = row_bands(10, 4);
/// assert_eq!(
///     bands,
///     vec![
///         RowBand::new(0, 3),
///         RowBand::new(3, 6),
///         RowBand::new(6, 9),
///         RowBand::new(9, 10),
///     ]
/// );
/// ```
pub fn row_bands(target_height: u32, worker_count: usize) -> Vec<RowBand> {
    let workers = worker_count.max(1);
    let band_size = (target_height as usize).div_ceil(workers) as u32;
    let mut bands = Vec::with_capacity(workers.min(target_height as usize));
    let mut y = 0;
    while y < target_height {
        let end = y.saturating_add(band_size).min(target_height);
        bands.push(RowBand::new(y, end));
        y = end;
    }
    bands
}

/// How workers obtain the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSharing {
    /// Every worker reads the same reference-counted source image
    #[default]
    Shared,
    /// The source is serialized once and every worker decodes a private copy
    Isolated,
}

/// Options for parallel resampling
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    /// Requested number of workers (at least 1)
    pub workers: usize,
    /// How the source image reaches the workers
    pub sharing: SourceSharing,
    /// Cap the pool thread count at the machine's available parallelism
    pub limit_to_available: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            sharing: SourceSharing::Shared,
            limit_to_available: true,
        }
    }
}

impl ResizeOptions {
    /// Create options with a specific worker count
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    /// Set how the source image is shared with workers
    pub fn sharing(mut self, sharing: SourceSharing) -> Self {
        self.sharing = sharing;
        self
    }

    /// Set whether the thread count is capped at available parallelism
    pub fn limit_to_available(mut self, limit: bool) -> Self {
        self.limit_to_available = limit;
        self
    }

    /// Row bands for an output of `target_height` rows, one per requested worker.
    ///
    /// The plan depends only on the requested worker count, never on the
    /// host, so the partition is the same on every machine.
    pub fn band_plan(&self, target_height: u32) -> Vec<RowBand> {
        row_bands(target_height, self.workers)
    }

    /// Number of pool threads used to run `band_count` bands.
    ///
    /// With `limit_to_available`, bands beyond the machine's available
    /// parallelism queue on the pool instead of each getting a thread.
    pub fn pool_threads(&self, band_count: usize) -> usize {
        let mut threads = band_count.max(1);
        if self.limit_to_available {
            let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
            threads = threads.min(available);
        }
        threads
    }
}

/// Scale an image with bilinear interpolation split into `workers` row bands.
///
/// Equivalent to [`resize_parallel_with_options`] with
/// [`ResizeOptions::with_workers`].
pub fn resize_parallel(pix: &Pix, scale: f64, workers: usize) -> TransformResult<Pix> {
    resize_parallel_with_options(pix, scale, &ResizeOptions::with_workers(workers))
}

/// Scale an image with bilinear interpolation using row-banded workers.
///
/// The result is pixel-identical to [`crate::resize`] for every worker
/// count. All arguments are validated before any worker starts, and the
/// output image is only allocated once every band has completed.
///
/// # Errors
///
/// - [`TransformError::InvalidScale`] if `scale` is not a positive finite number
/// - [`TransformError::InvalidWorkerCount`] if `options.workers` is 0
/// - [`TransformError::InvalidTargetSize`] if the output would be empty or too large
/// - [`TransformError::WorkerPool`] if the worker threads cannot be started
/// - [`TransformError::WorkerFailure`] for the first band (in row order) that failed
pub fn resize_parallel_with_options(
    pix: &Pix,
    scale: f64,
    options: &ResizeOptions,
) -> TransformResult<Pix> {
    validate_scale(scale)?;
    if options.workers == 0 {
        return Err(TransformError::InvalidWorkerCount(0));
    }
    if scale == 1.0 {
        return Ok(pix.deep_clone());
    }

    let (tw, th) = target_size(pix, scale)?;
    let bands = options.band_plan(th);
    let threads = options.pool_threads(bands.len());
    debug!(
        target_width = tw,
        target_height = th,
        requested = options.workers,
        bands = bands.len(),
        threads,
        sharing = ?options.sharing,
        "resizing in parallel"
    );

    let results = match options.sharing {
        SourceSharing::Shared => dispatch_bands(&bands, threads, |band, cancel| {
            let source = pix.clone();
            render_band(&source, scale, tw, band, cancel)
        })?,
        SourceSharing::Isolated => {
            let encoded: Arc<[u8]> = pix.write_spix_to_bytes()?.into();
            dispatch_bands(&bands, threads, |band, cancel| {
                let source = Pix::read_spix_from_bytes(&encoded)?;
                render_band(&source, scale, tw, band, cancel)
            })?
        }
    };

    let mut out = PixMut::new(tw, th)?;
    out.copy_format_from(pix);
    merge_bands(&mut out, &bands, results)?;
    debug!(bands = bands.len(), "merged row bands");

    Ok(out.into())
}

/// Why a band produced no pixels
#[derive(Debug)]
enum BandError {
    /// Stopped because another band failed
    Cancelled,
    /// Failed on its own
    Failed(String),
}

impl From<TransformError> for BandError {
    fn from(err: TransformError) -> Self {
        BandError::Failed(err.to_string())
    }
}

impl From<rescale_core::Error> for BandError {
    fn from(err: rescale_core::Error) -> Self {
        BandError::Failed(err.to_string())
    }
}

type BandResult = Result<Vec<u32>, BandError>;

/// Resample every row of `band` into a new buffer, row-major.
fn render_band(
    src: &Pix,
    scale: f64,
    target_width: u32,
    band: RowBand,
    cancel: &AtomicBool,
) -> BandResult {
    let width = target_width as usize;
    let mut pixels = vec![0u32; band.rows() as usize * width];
    for (row, y) in pixels.chunks_exact_mut(width).zip(band.y_start..band.y_end) {
        if cancel.load(Ordering::Relaxed) {
            return Err(BandError::Cancelled);
        }
        resample_row(src, scale, y, row);
    }
    Ok(pixels)
}

/// Run `job` once per band on a pool of `threads` threads.
///
/// Returns one buffer per band, in band order. A panicking job counts as
/// a failure. After the first failure the cancellation flag passed to
/// every job is raised; the reported error is the lowest-indexed band
/// that actually failed rather than one that was cancelled.
fn dispatch_bands<F>(
    bands: &[RowBand],
    threads: usize,
    job: F,
) -> TransformResult<Vec<Vec<u32>>>
where
    F: Fn(RowBand, &AtomicBool) -> BandResult + Sync,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("rescale-worker-{i}"))
        .build()
        .map_err(|e| TransformError::WorkerPool(e.to_string()))?;
    let cancel = AtomicBool::new(false);

    let outcomes: Vec<BandResult> = pool.install(|| {
        bands
            .par_iter()
            .map(|&band| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| job(band, &cancel)))
                    .unwrap_or_else(|payload| Err(BandError::Failed(panic_message(&*payload))));
                if let Err(BandError::Failed(message)) = &outcome {
                    cancel.store(true, Ordering::Relaxed);
                    warn!(
                        y_start = band.y_start,
                        y_end = band.y_end,
                        %message,
                        "row band failed"
                    );
                }
                outcome
            })
            .collect()
    });
    drop(pool);

    let mut results = Vec::with_capacity(bands.len());
    let mut cancelled = None;
    for (band, outcome) in bands.iter().zip(outcomes) {
        match outcome {
            Ok(pixels) => results.push(pixels),
            Err(BandError::Failed(message)) => {
                return Err(TransformError::WorkerFailure {
                    y_start: band.y_start,
                    y_end: band.y_end,
                    message,
                });
            }
            Err(BandError::Cancelled) => {
                cancelled.get_or_insert(*band);
            }
        }
    }
    if let Some(band) = cancelled {
        return Err(TransformError::WorkerFailure {
            y_start: band.y_start,
            y_end: band.y_end,
            message: "cancelled".to_string(),
        });
    }
    Ok(results)
}

/// Copy each band's buffer into its rows of `out`.
fn merge_bands(
    out: &mut PixMut,
    bands: &[RowBand],
    results: Vec<Vec<u32>>,
) -> TransformResult<()> {
    let width = out.width() as usize;
    for (band, pixels) in bands.iter().zip(results) {
        let expected = band.rows() as usize * width;
        if pixels.len() != expected {
            return Err(TransformError::WorkerFailure {
                y_start: band.y_start,
                y_end: band.y_end,
                message: format!("returned {} pixels, expected {expected}", pixels.len()),
            });
        }
        out.rows_mut(band.y_start, band.y_end)?.copy_from_slice(&pixels);
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
