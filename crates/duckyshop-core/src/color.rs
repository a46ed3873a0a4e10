//! Conversion between BGR buffers and a perceptual lightness/chroma space.
//!
//! Only the Lab equalization path uses this. The [`PerceptualSpace`] trait is
//! the seam; [`CieLab`] is the bundled implementation (sRGB, D65 white,
//! 8-bit encoded like common imaging libraries: `L * 255 / 100`, `a + 128`,
//! `b + 128`).

use crate::raster::{RasterImage, CHANNELS};

/// An image split into a lightness plane and two chroma planes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerceptualPlanes {
    pub width: u32,
    pub height: u32,
    /// 256-level lightness, one value per pixel.
    pub lightness: Vec<u8>,
    /// First chroma component, one value per pixel.
    pub chroma_a: Vec<u8>,
    /// Second chroma component, one value per pixel.
    pub chroma_b: Vec<u8>,
}

/// A reversible mapping from BGR to a lightness/chroma representation.
pub trait PerceptualSpace {
    fn to_perceptual(&self, image: &RasterImage) -> PerceptualPlanes;

    fn from_perceptual(&self, planes: &PerceptualPlanes) -> RasterImage;
}

/// sRGB to CIE L*a*b* with a D65 white point.
#[derive(Debug, Clone, Copy, Default)]
pub struct CieLab;

// D65 reference white
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;
const CHROMA_OFFSET: f32 = 128.0;

impl PerceptualSpace for CieLab {
    fn to_perceptual(&self, image: &RasterImage) -> PerceptualPlanes {
        let count = image.pixel_count();
        let mut lightness = Vec::with_capacity(count);
        let mut chroma_a = Vec::with_capacity(count);
        let mut chroma_b = Vec::with_capacity(count);

        for px in image.pixels.chunks_exact(CHANNELS) {
            let [l, a, b] = bgr_to_lab(px[0], px[1], px[2]);
            lightness.push(l);
            chroma_a.push(a);
            chroma_b.push(b);
        }

        PerceptualPlanes {
            width: image.width,
            height: image.height,
            lightness,
            chroma_a,
            chroma_b,
        }
    }

    fn from_perceptual(&self, planes: &PerceptualPlanes) -> RasterImage {
        let pixels = planes
            .lightness
            .iter()
            .zip(&planes.chroma_a)
            .zip(&planes.chroma_b)
            .flat_map(|((&l, &a), &b)| lab_to_bgr(l, a, b))
            .collect();
        RasterImage::new(planes.width, planes.height, pixels)
    }
}

/// Encode one BGR pixel as 8-bit `[L, a, b]`.
pub fn bgr_to_lab(b: u8, g: u8, r: u8) -> [u8; 3] {
    let r = srgb_to_linear(r as f32 / 255.0);
    let g = srgb_to_linear(g as f32 / 255.0);
    let b = srgb_to_linear(b as f32 / 255.0);

    let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / WHITE_X;
    let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
    let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / WHITE_Z;

    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));

    let l = if y > EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        KAPPA * y
    };
    let a = 500.0 * (fx - fy) + CHROMA_OFFSET;
    let bb = 200.0 * (fy - fz) + CHROMA_OFFSET;

    [to_u8(l * 255.0 / 100.0), to_u8(a), to_u8(bb)]
}

/// Decode an 8-bit `[L, a, b]` triple back to one BGR pixel.
pub fn lab_to_bgr(l: u8, a: u8, b: u8) -> [u8; 3] {
    let l = l as f32 * 100.0 / 255.0;
    let a = a as f32 - CHROMA_OFFSET;
    let b = b as f32 - CHROMA_OFFSET;

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let y = if l > KAPPA * EPSILON {
        fy * fy * fy
    } else {
        l / KAPPA
    };
    let x = lab_f_inv(fx) * WHITE_X;
    let z = lab_f_inv(fz) * WHITE_Z;

    let r = 3.240479 * x - 1.537150 * y - 0.498535 * z;
    let g = -0.969256 * x + 1.875991 * y + 0.041556 * z;
    let bl = 0.055648 * x - 0.204043 * y + 1.057311 * z;

    [
        to_u8(linear_to_srgb(bl) * 255.0),
        to_u8(linear_to_srgb(g) * 255.0),
        to_u8(linear_to_srgb(r) * 255.0),
    ]
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > EPSILON {
        cube
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

#[inline]
fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
