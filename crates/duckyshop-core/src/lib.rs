//! Ducky Shop Core - image transform and editing-pipeline engine
//!
//! This crate provides the pixel-level engines of the Ducky Shop editor
//! (geometry, radiometric adjustments, 3x3 filtering, histograms and
//! equalization) and the [`EditingSession`] that composes them into a
//! reproducible sequence of destructive and non-destructive edits.
//!
//! Every engine function is pure: it borrows a [`RasterImage`] and returns a
//! new one. Only the session holds state.

pub mod adjustments;
pub mod color;
pub mod convolution;
pub mod histogram;
pub mod io;
pub mod luminance;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use adjustments::{brightness, contrast, negative, quantize, to_grey};
pub use color::{CieLab, PerceptualPlanes, PerceptualSpace};
pub use convolution::{convolve, Kernel};
pub use histogram::{equalize_direct, equalize_via_lab, ChannelHistogram, ImageHistogram};
pub use io::{DecodeError, EncodeError, SaveOptions};
pub use pipeline::{AdjustmentParams, EditingSession, ParameterError};
pub use raster::{Channel, RasterImage};
pub use transform::{enlarge, mirror_horizontal, mirror_vertical, reduce, rotate90};
