//! The pixel buffer every engine operates on.
//!
//! A `RasterImage` is a row-major, 3-channel, 8-bit buffer. Channels are
//! stored in BGR order: channel 0 is the blue channel, which doubles as the
//! luminance proxy once an image has been converted to grey.

use serde::{Deserialize, Serialize};

/// Number of channels per pixel.
pub const CHANNELS: usize = 3;

/// One of the three colour channels of a `RasterImage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    /// Channel 0, the luminance proxy.
    Blue = 0,
    /// Channel 1.
    Green = 1,
    /// Channel 2.
    Red = 2,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Blue, Channel::Green, Channel::Red];

    /// Offset of this channel inside a pixel.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A 3-channel, 8-bit raster image.
///
/// Images are values: every transform takes `&RasterImage` and returns a new
/// buffer, leaving its input untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels (number of columns).
    pub width: u32,
    /// Image height in pixels (number of rows).
    pub height: u32,
    /// BGR pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RasterImage with the given dimensions and BGR pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an all-black image.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create an image where every pixel has the same BGR value.
    pub fn filled(width: u32, height: u32, pixel: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from interleaved RGB data, swapping into BGR storage order.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Option<Self> {
        if rgb.len() != width as usize * height as usize * CHANNELS {
            return None;
        }
        let pixels = rgb
            .chunks_exact(CHANNELS)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Interleaved RGB copy of the pixel data.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(CHANNELS)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect()
    }

    /// Byte offset of the pixel at `row`, `col`.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        (row * self.width as usize + col) * CHANNELS
    }

    /// Pixel at `row`, `col` as `[c0, c1, c2]`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let idx = self.offset(row, col);
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Overwrite the BGR pixel at `row`, `col`.
    #[inline]
    pub fn set_pixel(&mut self, row: usize, col: usize, pixel: [u8; 3]) {
        let idx = self.offset(row, col);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&pixel);
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Iterate over the values of one channel in row-major order.
    pub fn channel_values(&self, channel: Channel) -> impl Iterator<Item = u8> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(move |px| px[channel.index()])
    }

    /// Apply `f` to every channel value, producing a new image.
    pub fn map_values(&self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Apply `f` to every pixel, producing a new image.
    pub fn map_pixels(&self, f: impl Fn([u8; 3]) -> [u8; 3]) -> Self {
        let pixels = self
            .pixels
            .chunks_exact(CHANNELS)
            .flat_map(|px| f([px[0], px[1], px[2]]))
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}
