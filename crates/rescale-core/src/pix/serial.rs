//! SPIX serialization - uncompressed binary image format
//!
//! Provides fast, lossless serialization of `Pix` images, used to hand a
//! private copy of a source image to an isolated worker.
//!
//! # Format layout
//!
//! ```text
//! Offset       Size          Field
//! ------       ----          -----
//! 0            4             "spix" magic bytes
//! 4            4             width (u32)
//! 8            4             height (u32)
//! 12           4             spp (u32)
//! 16           4             raster data size (= 4 * w * h)
//! 20           rdatasize     raw raster data (u32 words)
//! ```
//!
//! All integers are little-endian.

use crate::error::{Error, Result};
use crate::pix::{Pix, PixMut};
use std::io::Write;

const SPIX_MAGIC: &[u8; 4] = b"spix";
const HEADER_SIZE: usize = 20;

/// SPIX header information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpixHeader {
    pub width: u32,
    pub height: u32,
    pub spp: u32,
    pub rdatasize: u32,
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl Pix {
    /// Read only the SPIX header without loading raster data.
    pub fn read_spix_header(data: &[u8]) -> Result<SpixHeader> {
        if data.len() < HEADER_SIZE {
            return Err(Error::DecodeError(format!(
                "spix data too short: {} bytes",
                data.len()
            )));
        }
        if &data[0..4] != SPIX_MAGIC {
            return Err(Error::DecodeError("missing spix magic".to_string()));
        }
        Ok(SpixHeader {
            width: read_u32(data, 4),
            height: read_u32(data, 8),
            spp: read_u32(data, 12),
            rdatasize: read_u32(data, 16),
        })
    }

    /// Deserialize a `Pix` from SPIX bytes.
    pub fn read_spix_from_bytes(data: &[u8]) -> Result<Self> {
        let header = Self::read_spix_header(data)?;
        let expected = (header.width as usize)
            .checked_mul(header.height as usize)
            .and_then(|n| n.checked_mul(4))
            .filter(|&n| n == header.rdatasize as usize)
            .ok_or_else(|| {
                Error::DecodeError(format!(
                    "spix raster size {} does not match {}x{}",
                    header.rdatasize, header.width, header.height
                ))
            })?;
        let raster = data
            .get(HEADER_SIZE..HEADER_SIZE + expected)
            .ok_or_else(|| Error::DecodeError("spix raster truncated".to_string()))?;

        let mut pix = PixMut::new(header.width, header.height)?;
        for (dst, chunk) in pix.data_mut().iter_mut().zip(raster.chunks_exact(4)) {
            *dst = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        pix.set_spp(header.spp);
        Ok(pix.into())
    }

    /// Serialize this `Pix` to SPIX binary format via a writer.
    pub fn write_spix(&self, writer: &mut impl Write) -> Result<()> {
        let rdatasize = u32::try_from(self.data().len() * 4).map_err(|_| {
            Error::InvalidParameter(format!(
                "{}x{} image too large for spix",
                self.width(),
                self.height()
            ))
        })?;
        writer.write_all(SPIX_MAGIC)?;
        writer.write_all(&self.width().to_le_bytes())?;
        writer.write_all(&self.height().to_le_bytes())?;
        writer.write_all(&self.spp().to_le_bytes())?;
        writer.write_all(&rdatasize.to_le_bytes())?;
        for word in self.data() {
            writer.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }

    /// Serialize this `Pix` to SPIX bytes.
    pub fn write_spix_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + self.data().len() * 4);
        self.write_spix(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spix_header() {
        let mut pm = PixMut::new(3, 2).unwrap();
        pm.set_spp(4);
        let pix: Pix = pm.into();
        let bytes = pix.write_spix_to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 24);
        let header = Pix::read_spix_header(&bytes).unwrap();
        assert_eq!(
            header,
            SpixHeader {
                width: 3,
                height: 2,
                spp: 4,
                rdatasize: 24
            }
        );
    }

    #[test]
    fn test_spix_preserves_pixels_and_spp() {
        let mut pm = PixMut::new(2, 2).unwrap();
        pm.set_spp(4);
        pm.data_mut()
            .copy_from_slice(&[0xFF0000FF, 0x00FF00FF, 0x0000FFFF, 0x12345678]);
        let pix: Pix = pm.into();

        let copy = Pix::read_spix_from_bytes(&pix.write_spix_to_bytes().unwrap()).unwrap();
        assert!(copy.equals(&pix));
        assert_eq!(copy.spp(), 4);
        assert!(!copy.shares_data_with(&pix));
    }

    #[test]
    fn test_spix_rejects_bad_input() {
        assert!(Pix::read_spix_from_bytes(b"spix").is_err());
        assert!(Pix::read_spix_from_bytes(b"xxxx0000000000000000").is_err());

        let pix = Pix::new(2, 2).unwrap();
        let mut bytes = pix.write_spix_to_bytes().unwrap();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            Pix::read_spix_from_bytes(&bytes),
            Err(Error::DecodeError(_))
        ));
    }
}
