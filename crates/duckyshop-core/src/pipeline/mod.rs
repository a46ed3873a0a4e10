//! The editing pipeline.
//!
//! An [`EditingSession`] owns three buffers:
//! - `original`: the image the session started from, never modified
//! - `structural`: every destructive edit folded in, one after another
//! - `visible`: `structural` with the [`AdjustmentParams`] replayed on top
//!
//! Destructive edits (geometry, greyscale, negative, filters, equalization)
//! replace `structural`. Adjustments only store a value and rebuild `visible`
//! from scratch through [`recompute`], so they never stack.

mod params;
mod session;

use thiserror::Error;

pub use params::{recompute, Adjustable, AdjustmentParams};
pub use session::EditingSession;

/// A request that was rejected before reaching the engine.
///
/// The session is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Quantization needs at least one grey level")]
    ZeroQuantization,

    #[error("Zoom-out factors must be positive, got {row_factor} x {col_factor}")]
    ZeroResampleFactor { row_factor: u32, col_factor: u32 },

    #[error("Contrast gain must be a non-negative number, got {0}")]
    InvalidContrast(f32),

    #[error("Kernel coefficients must be finite numbers")]
    NonFiniteKernel,
}
