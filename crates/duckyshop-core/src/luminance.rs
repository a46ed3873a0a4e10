//! Grey-level calculation shared by greyscale conversion, quantization and
//! filter gating.
//!
//! Weights are the ITU-R BT.601 luma coefficients applied to BGR channel
//! order. The result is truncated, never rounded.

/// BT.601 weight for channel 0 (blue), in thousandths.
pub const WEIGHT_BLUE: u32 = 114;

/// BT.601 weight for channel 1 (green), in thousandths.
pub const WEIGHT_GREEN: u32 = 587;

/// BT.601 weight for channel 2 (red), in thousandths.
pub const WEIGHT_RED: u32 = 299;

const WEIGHT_SCALE: u32 = 1000;

/// Grey level of a BGR pixel: `floor(0.114*b + 0.587*g + 0.299*r)`.
///
/// Evaluated in integer thousandths so the floor is exact. A floating-point
/// evaluation lands just below the integer for some grey inputs (23 becomes
/// 22.999...), which would make greyscale conversion drift on repeat.
#[inline]
pub fn grey_level(b: u8, g: u8, r: u8) -> u8 {
    let weighted = WEIGHT_BLUE * b as u32 + WEIGHT_GREEN * g as u32 + WEIGHT_RED * r as u32;
    (weighted / WEIGHT_SCALE) as u8
}

/// Whether every pixel of a BGR buffer has three equal channels.
pub fn is_grey_buffer(pixels: &[u8]) -> bool {
    pixels
        .chunks_exact(3)
        .all(|px| px[0] == px[1] && px[1] == px[2])
}
