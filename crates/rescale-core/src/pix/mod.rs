//! PIX - The main image container
//!
//! `Pix` is a dense 32-bit raster. Every pixel is one packed `u32` in
//! `0xRRGGBBAA` order (see [`crate::Channel`]), and rows are stored top to
//! bottom with no padding, so pixel `(x, y)` lives at `data[y * width + x]`.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared, read-only ownership), which is
//! what lets many resampling workers read one source image at once.
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
pub mod compare;
pub mod serial;

pub use serial::SpixHeader;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format
    Pnm,
    /// Serialized PIX format
    Spix,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
            Self::Spix => "spix",
        }
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 for RGB with opaque alpha, 4 for RGBA)
    spp: u32,
    /// Input file format
    informat: ImageFormat,
    /// Packed pixels, row-major
    data: Vec<u32>,
}

impl PixData {
    fn blank(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = pixel_count(width, height)?;
        Ok(PixData {
            width,
            height,
            spp: 3,
            informat: ImageFormat::Unknown,
            data: vec![0u32; len],
        })
    }

    fn duplicate(&self) -> Self {
        PixData {
            width: self.width,
            height: self.height,
            spp: self.spp,
            informat: self.informat,
            data: self.data.clone(),
        }
    }
}

/// Number of pixels in a `width` x `height` raster, checked against `usize`.
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use rescale_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new 32-bit PIX with all pixels set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::blank(width, height)?),
        })
    }

    /// Create a PIX from row-major packed pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_data(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != pixel_count(width, height)? {
            return Err(Error::InvalidParameter(format!(
                "{} pixels supplied for a {}x{} image",
                data.len(),
                width,
                height
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                spp: 3,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two handles share the same pixel buffer.
    #[inline]
    pub fn shares_data_with(&self, other: &Pix) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.inner.duplicate(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed `PixMut`.
    ///
    /// This is equivalent to `Pix::new` but returns a mutable variant directly.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::blank(width, height)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Set samples per pixel.
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }

    /// Set the input format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Copy samples-per-pixel and input format from another image.
    pub fn copy_format_from(&mut self, src: &Pix) {
        self.inner.spp = src.spp();
        self.inner.informat = src.informat();
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Get mutable access to rows `y_start..y_end` as one contiguous slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the range is empty, reversed,
    /// or extends past the last row.
    pub fn rows_mut(&mut self, y_start: u32, y_end: u32) -> Result<&mut [u32]> {
        if y_start >= y_end || y_end > self.inner.height {
            return Err(Error::IndexOutOfBounds {
                index: y_end as usize,
                len: self.inner.height as usize,
            });
        }
        let w = self.inner.width as usize;
        Ok(&mut self.inner.data[y_start as usize * w..y_end as usize * w])
    }

    /// Set every pixel to `val`.
    pub fn set_all(&mut self, val: u32) {
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}
