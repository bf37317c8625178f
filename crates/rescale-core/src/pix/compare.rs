//! Image comparison
//!
//! Exact pixel equality between two images.

use super::Pix;
use crate::error::{Error, Result};

impl Pix {
    /// Check whether two images have the same size and identical pixels.
    ///
    /// Samples-per-pixel and input format are not compared.
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Count the pixels that differ between two same-sized images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn count_pixel_diffs(&self, other: &Pix) -> Result<usize> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        Ok(self
            .data()
            .iter()
            .zip(other.data())
            .filter(|(a, b)| a != b)
            .count())
    }

    /// Find the first differing pixel in row-major order.
    ///
    /// Returns `None` when the images are equal or differ in size.
    pub fn first_pixel_diff(&self, other: &Pix) -> Option<(u32, u32)> {
        if !self.sizes_equal(other) {
            return None;
        }
        let w = self.width() as usize;
        self.data()
            .iter()
            .zip(other.data())
            .position(|(a, b)| a != b)
            .map(|i| ((i % w) as u32, (i / w) as u32))
    }
}
