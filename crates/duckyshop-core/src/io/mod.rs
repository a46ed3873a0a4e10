//! Loading and saving raster images.
//!
//! Decoders hand back interleaved RGB; this module swaps it into the BGR
//! storage order of [`RasterImage`] on load and back to RGB on save.
//!
//! # Examples
//!
//! ```ignore
//! use duckyshop_core::io::{load, save, SaveOptions};
//!
//! let image = load("photo.jpg").unwrap();
//! save(&image, "DuckyShop.jpeg", &SaveOptions::default()).unwrap();
//! ```
//!
//! [`RasterImage`]: crate::RasterImage

mod decode;
mod encode;

pub use decode::{load, load_from_bytes, read_orientation, DecodeError, Orientation};
pub use encode::{encode_jpeg, encode_png, save, EncodeError, SaveOptions, DEFAULT_FILE_NAME};
