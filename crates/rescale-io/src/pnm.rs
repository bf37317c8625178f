//! PNM (Portable Any Map) format support
//!
//! Reads binary PGM (P5) and PPM (P6) with a maxval of 255, and writes
//! binary PPM (P6). ASCII variants (P1/P2/P3) and bitmaps (P4) are
//! recognized by format detection but rejected here.

use crate::{IoError, IoResult};
use rescale_core::{ImageFormat, Pix, PixMut, color};
use std::io::{Read, Write};

/// Cursor over the PNM header tokens.
struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderParser<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> IoResult<&'a str> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("truncated PNM header".to_string()));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
    }

    fn next_u32(&mut self) -> IoResult<u32> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| IoError::InvalidData(format!("bad PNM header value: {token}")))
    }
}

/// Read a binary PNM image (P5/P6) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut parser = HeaderParser {
        data: &data,
        pos: 0,
    };
    let samples = match parser.next_token()? {
        "P5" => 1,
        "P6" => 3,
        magic => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM variant: {magic}"
            )));
        }
    };
    let width = parser.next_u32()?;
    let height = parser.next_u32()?;
    let maxval = parser.next_u32()?;
    if maxval != 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM maxval: {maxval}"
        )));
    }
    // Exactly one whitespace byte separates the header from the raster
    let raster_start = parser.pos + 1;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(samples))
        .ok_or_else(|| IoError::InvalidData(format!("PNM size {width}x{height} overflows")))?;
    let raster = raster_start
        .checked_add(expected)
        .and_then(|end| data.get(raster_start..end))
        .ok_or_else(|| IoError::InvalidData("truncated PNM raster".to_string()))?;

    let mut pix_mut = PixMut::new(width, height)?;
    pix_mut.set_informat(ImageFormat::Pnm);

    for (dst, px) in pix_mut
        .data_mut()
        .iter_mut()
        .zip(raster.chunks_exact(samples))
    {
        *dst = match *px {
            [g] => color::compose_rgb(g, g, g),
            [r, g, b] => color::compose_rgb(r, g, b),
            _ => unreachable!("chunks_exact yields {samples} samples"),
        };
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PPM (P6) to a writer.
///
/// Alpha is discarded.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", pix.width(), pix.height())?;
    let mut raster = Vec::with_capacity(pix.data().len() * 3);
    for &pixel in pix.data() {
        let (r, g, b) = color::extract_rgb(pixel);
        raster.extend_from_slice(&[r, g, b]);
    }
    writer.write_all(&raster)?;
    Ok(())
}
