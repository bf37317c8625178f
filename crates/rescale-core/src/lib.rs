//! rescale-core - Basic data structures for image resampling
//!
//! This crate provides the fundamental data structures used throughout
//! the rescale workspace:
//!
//! - [`Pix`] / [`PixMut`] - The 32-bit RGBA image container (immutable / mutable)
//! - [`Channel`] - The four 8-bit lanes of a packed pixel and their bit offsets
//! - SPIX serialization for handing images across worker boundaries

pub mod channel;
pub mod error;
pub mod pix;

pub use channel::Channel;
pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut, SpixHeader};

/// Packed-pixel helpers for 32-bit RGBA pixels.
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    pub use crate::channel::{compose_rgb, compose_rgba, extract_rgb, extract_rgba};
}
