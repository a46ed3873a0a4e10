//! Zoom in (2x linear upsample) and zoom out (block-average downsample).
//!
//! Both operations average with truncating integer division, channel by
//! channel.

use crate::raster::{RasterImage, CHANNELS};

/// Enlarge an image to `(2w - 1) x (2h - 1)` by linear interpolation.
///
/// The passes run in a fixed order and each reads the output buffer:
/// 1. Source pixels land on even rows and even columns.
/// 2. Odd columns of even rows take the mean of their left and right
///    neighbours.
/// 3. Every column of the odd rows takes the mean of the rows above and
///    below, so odd/odd pixels average the values written by pass 2.
pub fn enlarge(image: &RasterImage) -> RasterImage {
    if image.is_empty() {
        return image.clone();
    }

    let dst_w = image.width as usize * 2 - 1;
    let dst_h = image.height as usize * 2 - 1;
    let mut output = RasterImage::zeros(dst_w as u32, dst_h as u32);

    for i in (0..dst_h).step_by(2) {
        for j in (0..dst_w).step_by(2) {
            output.set_pixel(i, j, image.pixel(i / 2, j / 2));
        }
    }

    for i in (0..dst_h).step_by(2) {
        for j in (1..dst_w).step_by(2) {
            let mean = mean_pixel(output.pixel(i, j - 1), output.pixel(i, j + 1));
            output.set_pixel(i, j, mean);
        }
    }

    for i in (1..dst_h).step_by(2) {
        for j in 0..dst_w {
            let mean = mean_pixel(output.pixel(i - 1, j), output.pixel(i + 1, j));
            output.set_pixel(i, j, mean);
        }
    }

    output
}

#[inline]
fn mean_pixel(a: [u8; 3], b: [u8; 3]) -> [u8; 3] {
    let mut out = [0u8; 3];
    for k in 0..CHANNELS {
        out[k] = ((a[k] as u16 + b[k] as u16) / 2) as u8;
    }
    out
}

/// Reduce an image by averaging `row_factor x col_factor` blocks.
///
/// The output is `ceil(h / row_factor)` rows by `ceil(w / col_factor)`
/// columns. Blocks on the bottom and right edges shrink to the pixels that
/// exist in the source.
///
/// Both factors must be at least 1; the editing session validates them
/// before calling this.
pub fn reduce(image: &RasterImage, row_factor: u32, col_factor: u32) -> RasterImage {
    debug_assert!(row_factor > 0 && col_factor > 0, "reduce factors must be positive");

    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (sx, sy) = (row_factor as usize, col_factor as usize);
    let dst_h = src_h.div_ceil(sx);
    let dst_w = src_w.div_ceil(sy);

    let mut output = RasterImage::zeros(dst_w as u32, dst_h as u32);

    for i in 0..dst_h {
        let rows = i * sx..((i + 1) * sx).min(src_h);
        for j in 0..dst_w {
            let cols = j * sy..((j + 1) * sy).min(src_w);

            let mut sums = [0u32; 3];
            for row in rows.clone() {
                for col in cols.clone() {
                    let px = image.pixel(row, col);
                    for k in 0..CHANNELS {
                        sums[k] += px[k] as u32;
                    }
                }
            }

            let count = (rows.len() * cols.len()) as u32;
            output.set_pixel(
                i,
                j,
                [
                    (sums[0] / count) as u8,
                    (sums[1] / count) as u8,
                    (sums[2] / count) as u8,
                ],
            );
        }
    }

    output
}
