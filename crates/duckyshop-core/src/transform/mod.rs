//! Geometric transforms: mirrors, quarter-turn rotation, zoom in and zoom out.
//!
//! Every transform is a pure function from `&RasterImage` to a new
//! `RasterImage`. Output dimensions may differ from the input, channel count
//! and depth never do.
//!
//! # Coordinate System
//!
//! - `(i, j)` is `(row, column)`, origin at the top-left corner
//! - `width` counts columns, `height` counts rows

mod geometry;
mod resample;

pub use geometry::{mirror_horizontal, mirror_vertical, rotate90};
pub use resample::{enlarge, reduce};
