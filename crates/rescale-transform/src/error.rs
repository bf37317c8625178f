//! Error types for rescale-transform

use thiserror::Error;

/// Errors that can occur while resampling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rescale_core::Error),

    /// Scale factor is zero, negative, or not finite
    #[error("invalid scale factor: {0} (positive finite number required)")]
    InvalidScale(f64),

    /// Worker count is zero
    #[error("invalid worker count: {0} (at least one worker required)")]
    InvalidWorkerCount(usize),

    /// Scaled dimensions round to zero or do not fit in a `u32`
    #[error("invalid target size: {width}x{height}")]
    InvalidTargetSize { width: f64, height: f64 },

    /// The worker pool could not be started
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),

    /// A row band did not complete
    #[error("worker for rows {y_start}..{y_end} failed: {message}")]
    WorkerFailure {
        y_start: u32,
        y_end: u32,
        message: String,
    },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
