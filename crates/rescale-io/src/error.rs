//! Error type for reading and writing image files

use thiserror::Error;

/// Failure while decoding or encoding an image.
///
/// Codec errors from `png`, `jpeg-decoder` and `jpeg-encoder` are carried
/// as messages, so callers only ever match on this enum.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown extension, unrecognized magic bytes, or a codec disabled at build time
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Header fields or sample counts that cannot describe a valid image
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The codec rejected the input bytes
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The codec could not produce output for this image
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Building the decoded `Pix` failed (e.g. a zero dimension)
    #[error("core error: {0}")]
    Core(#[from] rescale_core::Error),
}

/// Result alias for image I/O.
pub type IoResult<T> = Result<T, IoError>;
