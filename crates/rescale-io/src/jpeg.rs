//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`. Every decoded image becomes an opaque 32-bit `Pix`;
//! alpha is dropped on write.

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use rescale_core::{ImageFormat, Pix, PixMut, color};
use std::io::{Read, Write};

/// Default quality used when writing JPEG files.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let samples = match info.pixel_format {
        PixelFormat::L8 => 1,
        PixelFormat::RGB24 => 3,
        PixelFormat::CMYK32 => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let expected = width as usize * height as usize * samples;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data holds {} bytes, expected {}",
            data.len(),
            expected
        )));
    }

    let mut pix_mut = PixMut::new(width, height)?;
    pix_mut.set_informat(ImageFormat::Jpeg);

    for (dst, px) in pix_mut
        .data_mut()
        .iter_mut()
        .zip(data.chunks_exact(samples))
    {
        *dst = match *px {
            [g] => color::compose_rgb(g, g, g),
            [r, g, b] => color::compose_rgb(r, g, b),
            // Adobe-style inverted CMYK
            [c, m, y, k] => {
                let scale = |v: u8| ((u16::from(v) * u16::from(k)) / 255) as u8;
                color::compose_rgb(scale(c), scale(m), scale(y))
            }
            _ => unreachable!("chunks_exact yields {samples} samples"),
        };
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as baseline RGB JPEG.
///
/// # Arguments
/// * `pix`     - The image to encode; alpha is discarded
/// * `writer`  - Destination writer
/// * `quality` - Encoder quality, 1..=100
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W, quality: u8) -> IoResult<()> {
    let too_large = || {
        IoError::EncodeError(format!(
            "{}x{} exceeds the JPEG size limit",
            pix.width(),
            pix.height()
        ))
    };
    let width = u16::try_from(pix.width()).map_err(|_| too_large())?;
    let height = u16::try_from(pix.height()).map_err(|_| too_large())?;

    let mut rgb = Vec::with_capacity(pix.data().len() * 3);
    for &pixel in pix.data() {
        let (r, g, b) = color::extract_rgb(pixel);
        rgb.extend_from_slice(&[r, g, b]);
    }

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(&rgb, width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
