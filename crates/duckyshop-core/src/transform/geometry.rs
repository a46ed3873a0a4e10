//! Mirror and quarter-turn rotation.
//!
//! These transforms only move pixels; channel values are copied byte for byte.

use crate::raster::{RasterImage, CHANNELS};

/// Mirror an image top-to-bottom.
///
/// Row `i` of the output is row `height - 1 - i` of the input.
///
/// # Example
///
/// ```
/// use duckyshop_core::{mirror_vertical, RasterImage};
///
/// let img = RasterImage::new(1, 2, vec![1, 1, 1, 2, 2, 2]);
/// assert_eq!(mirror_vertical(&img).pixels, vec![2, 2, 2, 1, 1, 1]);
/// ```
pub fn mirror_vertical(image: &RasterImage) -> RasterImage {
    let stride = image.row_stride();
    if stride == 0 {
        return image.clone();
    }

    let mut pixels = Vec::with_capacity(image.pixels.len());
    for row in image.pixels.chunks_exact(stride).rev() {
        pixels.extend_from_slice(row);
    }

    RasterImage::new(image.width, image.height, pixels)
}

/// Mirror an image left-to-right.
///
/// Column `j` of the output is column `width - 1 - j` of the input.
pub fn mirror_horizontal(image: &RasterImage) -> RasterImage {
    let stride = image.row_stride();
    if stride == 0 {
        return image.clone();
    }

    let mut pixels = Vec::with_capacity(image.pixels.len());
    for row in image.pixels.chunks_exact(stride) {
        for px in row.chunks_exact(CHANNELS).rev() {
            pixels.extend_from_slice(px);
        }
    }

    RasterImage::new(image.width, image.height, pixels)
}

/// Rotate an image a quarter turn clockwise.
///
/// The output is `height` pixels wide and `width` pixels tall, and
/// `out(i, j) = in(height - 1 - j, i)`. Four rotations give back the input.
pub fn rotate90(image: &RasterImage) -> RasterImage {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = (src_h, src_w);

    let mut output = RasterImage::zeros(dst_w as u32, dst_h as u32);

    for i in 0..dst_h {
        for j in 0..dst_w {
            output.set_pixel(i, j, image.pixel(src_h - 1 - j, i));
        }
    }

    output
}
