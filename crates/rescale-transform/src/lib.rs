//! rescale-transform - Bilinear resampling for rescale
//!
//! This crate provides the resampling engine:
//!
//! - Output-to-source coordinate mapping (pixel-center aligned)
//! - Four-neighbor bilinear sampling of packed RGBA pixels with edge clamping
//! - A sequential resize driver
//! - A row-banded parallel resize driver that produces identical output

pub mod coord;
mod error;
pub mod parallel;
pub mod sample;
pub mod scale;

pub use coord::map_coordinate;
pub use error::{TransformError, TransformResult};
pub use parallel::{
    ResizeOptions, RowBand, SourceSharing, resize_parallel, resize_parallel_with_options,
    row_bands,
};
pub use sample::{bilerp, clamp_channel, lerp, sample_bilinear};
pub use scale::{resize, target_size, validate_scale};
