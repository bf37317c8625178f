//! rescale - Bilinear image resampling for Rust
//!
//! Scales 32-bit RGBA images by an arbitrary positive factor with bilinear
//! interpolation, optionally splitting the output rows across several
//! worker threads.
//!
//! # Example
//!
//! ```
//! use rescale::Pix;
//! use rescale::transform::{resize, resize_parallel};
//!
//! let pix = Pix::new(64, 48).unwrap();
//! let half = resize(&pix, 0.5).unwrap();
//! assert_eq!((half.width(), half.height()), (32, 24));
//!
//! let banded = resize_parallel(&pix, 0.5, 4).unwrap();
//! assert!(banded.equals(&half));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rescale_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rescale_io as io;
pub use rescale_transform as transform;

pub mod cli;
