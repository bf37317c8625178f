//! Error types for rescale-core
//!
//! Raised when building, addressing, comparing or deserializing a [`crate::Pix`].

use thiserror::Error;

/// Error type for image container operations
#[derive(Error, Debug)]
pub enum Error {
    /// Zero width or height, or a pixel count that overflows `usize`
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel or row index outside the image
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two images were expected to have the same size
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized image data could not be decoded
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
