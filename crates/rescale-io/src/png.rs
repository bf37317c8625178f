//! PNG image format support
//!
//! Every PNG color type is expanded to 8 bits per sample on read and stored
//! as a 32-bit RGBA `Pix`. Images with an alpha channel (or a transparency
//! chunk) get `spp = 4`, others `spp = 3`.

use crate::{IoError, IoResult};
use rescale_core::{ImageFormat, Pix, PixMut, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let width = reader.info().width;
    let height = reader.info().height;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (samples, spp) = match color_type {
        ColorType::Grayscale => (1, 3),
        ColorType::GrayscaleAlpha => (2, 4),
        ColorType::Rgb => (3, 3),
        ColorType::Rgba => (4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let mut pix_mut = PixMut::new(width, height)?;
    pix_mut.set_spp(spp);
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..][..width as usize * samples];
        for (dst, px) in pix_mut
            .row_data_mut(y)
            .iter_mut()
            .zip(row.chunks_exact(samples))
        {
            *dst = match *px {
                [g] => color::compose_rgb(g, g, g),
                [g, a] => color::compose_rgba(g, g, g, a),
                [r, g, b] => color::compose_rgb(r, g, b),
                [r, g, b, a] => color::compose_rgba(r, g, b, a),
                _ => unreachable!("chunks_exact yields {samples} samples"),
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// Writes 8-bit RGBA when `spp == 4`, otherwise 8-bit RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let with_alpha = pix.spp() == 4;

    let (color_type, samples) = if with_alpha {
        (ColorType::Rgba, 4)
    } else {
        (ColorType::Rgb, 3)
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(pix.data().len() * samples);
    for &pixel in pix.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b]);
        if with_alpha {
            data.push(a);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgba() {
        let mut pix_mut = PixMut::new(3, 2).unwrap();
        pix_mut.set_spp(4);
        pix_mut.set_rgba(0, 0, 255, 0, 0, 255).unwrap();
        pix_mut.set_rgba(1, 0, 0, 255, 0, 128).unwrap();
        pix_mut.set_rgba(2, 1, 0, 0, 255, 0).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 4);
        assert_eq!(pix2.informat(), ImageFormat::Png);
        assert!(pix2.equals(&pix));
    }

    #[test]
    fn test_png_rgb_is_opaque() {
        let mut pix_mut = PixMut::new(2, 2).unwrap();
        pix_mut.set_rgb(0, 0, 10, 20, 30).unwrap();
        // Alpha is discarded for spp == 3
        pix_mut.set_pixel(1, 1, 0x40506000).unwrap();
        let pix: Pix = pix_mut.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();
        let pix2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(pix2.spp(), 3);
        assert_eq!(pix2.get_pixel(0, 0), Some(0x0A141EFF));
        assert_eq!(pix2.get_pixel(1, 1), Some(0x405060FF));
        assert_eq!(pix2.get_pixel(1, 0), Some(0x000000FF));
    }

    #[test]
    fn test_png_grayscale_expands_to_rgb() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0x00, 0x80]).unwrap();
        }
        let pix = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(0x000000FF));
        assert_eq!(pix.get_pixel(1, 0), Some(0x808080FF));
    }

    #[test]
    fn test_png_garbage_is_decode_error() {
        let result = read_png(Cursor::new(b"\x89PNG\r\n\x1a\nnot really".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
