//! Radiometric transforms: per-pixel value remapping.
//!
//! ## Operations
//! - Greyscale conversion (BT.601 weights, truncated)
//! - Negative
//! - Brightness (additive bias, clamped)
//! - Contrast (multiplicative gain, clamped at the top)
//! - Quantization (stepped-threshold reduction of grey levels)
//!
//! Each function returns a new image. Numeric clipping is defined behavior,
//! not an error.

use crate::luminance::grey_level;
use crate::raster::{Channel, RasterImage};

/// Convert an image to grey.
///
/// Every output channel is set to `floor(0.114*c0 + 0.587*c1 + 0.299*c2)`.
pub fn to_grey(image: &RasterImage) -> RasterImage {
    image.map_pixels(|[b, g, r]| {
        let lum = grey_level(b, g, r);
        [lum, lum, lum]
    })
}

/// Invert every channel value: `v -> 255 - v`.
pub fn negative(image: &RasterImage) -> RasterImage {
    image.map_values(|v| 255 - v)
}

/// Add `bias` to every channel value, clamping to `[0, 255]`.
pub fn brightness(image: &RasterImage, bias: i32) -> RasterImage {
    image.map_values(|v| (v as i32).saturating_add(bias).clamp(0, 255) as u8)
}

/// Multiply every channel value by `gain`, flooring and clamping at 255.
///
/// Only the upper bound is clamped. A negative gain produces a negative
/// intermediate that wraps when narrowed to 8 bits; the editing session
/// rejects negative gains before they get here.
pub fn contrast(image: &RasterImage, gain: f32) -> RasterImage {
    image.map_values(|v| {
        let scaled = (v as f32 * gain).floor() as i32;
        scaled.min(255) as u8
    })
}

/// Reduce the number of grey levels to at most `num_shades`.
///
/// Only channel 0 is read, so the image should already be grey. If the
/// image's shade range `[min, max]` already holds `num_shades` or fewer
/// levels the input is returned unchanged.
///
/// Otherwise the range is split into bins of real-valued width
/// `t = (max - min + 1) / num_shades`. A value `v` is mapped by walking
/// thresholds `base = min - 0.5 + t, min - 0.5 + 2t, ...` while `base < 255`
/// and taking `floor(base - t/2)` at the first `base` above `v`. When the
/// walk runs past 255 the last `base` is used. The walk, not a closed-form
/// bucket formula, decides the rounding at bin edges.
pub fn quantize(image: &RasterImage, num_shades: u32) -> RasterImage {
    let Some((min_shade, max_shade)) = shade_range(image) else {
        return image.clone();
    };

    let shade_count = max_shade as u32 - min_shade as u32 + 1;
    if num_shades >= shade_count {
        return image.clone();
    }

    let bin_width = shade_count as f32 / num_shades as f32;
    let table: [u8; 256] =
        std::array::from_fn(|v| representative_shade(v as u8, min_shade, bin_width));

    image.map_pixels(|[v, _, _]| {
        let shade = table[v as usize];
        [shade, shade, shade]
    })
}

/// Smallest and largest channel-0 value, or `None` for an empty image.
pub fn shade_range(image: &RasterImage) -> Option<(u8, u8)> {
    image
        .channel_values(Channel::Blue)
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn representative_shade(value: u8, min_shade: u8, bin_width: f32) -> u8 {
    let value = value as f32;
    let mut base = (min_shade as f64 - 0.5 + bin_width as f64) as f32;

    while base < 255.0 {
        if value < base {
            return (base - bin_width / 2.0) as u8;
        }
        base += bin_width;
    }

    (base - bin_width / 2.0) as u8
}
