//! rescale-io - Image I/O for rescale
//!
//! Decodes files and in-memory buffers into 32-bit [`Pix`] images and
//! encodes them back out.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | Yes  | Yes   | `png-format` |
//! | JPEG   | Yes  | Yes   | `jpeg` |
//! | PNM    | P5/P6 | P6   | `pnm` |
//! | SPIX   | Yes  | Yes   | always |

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format_from_bytes, format_from_extension, format_from_path};
pub use rescale_core::ImageFormat;

use rescale_core::Pix;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Read an image from a file path, detecting the format from its contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        ImageFormat::Spix => Ok(Pix::read_spix_from_bytes(data)?),
        other => Err(unsupported(other)),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let data = write_image_mem(pix, format)?;
    fs::write(path, data)?;
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, &mut buffer)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, &mut buffer, jpeg::DEFAULT_JPEG_QUALITY)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, &mut buffer)?,
        ImageFormat::Spix => pix.write_spix(&mut buffer)?,
        other => return Err(unsupported(other)),
    }
    Ok(buffer)
}

fn unsupported(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!(
        "{:?} is not supported or not enabled",
        format
    ))
}
